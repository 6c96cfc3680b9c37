use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub version: String,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            filter: FilterConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Keyword gates applied to the decoded subject before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// A subject must contain at least one of these phrases.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    /// A subject containing any of these phrases is dropped, even if included.
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
    /// Mailbox labels (e.g. Gmail categories) whose messages are never tracked.
    #[serde(default = "default_skip_labels")]
    pub skip_labels: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            blacklist: default_blacklist(),
            skip_labels: default_skip_labels(),
        }
    }
}

/// How the job title is pulled out of a subject line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStrategy {
    /// First capture of the ordered `title_patterns` list, else the whole subject.
    PatternWaterfall,
    /// Subject minus boilerplate phrases. Needs a company taken from the subject.
    #[default]
    SubtractiveCleanup,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Phrases in the message body that mark a rejection.
    #[serde(default = "default_body_rejection")]
    pub body_rejection: Vec<String>,
    #[serde(default = "default_rejection")]
    pub rejection: Vec<String>,
    #[serde(default = "default_offer")]
    pub offer: Vec<String>,
    #[serde(default = "default_interview")]
    pub interview: Vec<String>,
    /// Regexes tried in order against the subject; capture group 1 is the company.
    #[serde(default = "default_company_patterns")]
    pub company_patterns: Vec<String>,
    /// Regexes tried in order against the subject; capture group 1 is the title.
    #[serde(default = "default_title_patterns")]
    pub title_patterns: Vec<String>,
    /// Literal phrases removed during subtractive cleanup. `{company}` expands
    /// to the extracted company name.
    #[serde(default = "default_boilerplate")]
    pub boilerplate: Vec<String>,
    #[serde(default)]
    pub title_strategy: TitleStrategy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            body_rejection: default_body_rejection(),
            rejection: default_rejection(),
            offer: default_offer(),
            interview: default_interview(),
            company_patterns: default_company_patterns(),
            title_patterns: default_title_patterns(),
            boilerplate: default_boilerplate(),
            title_strategy: TitleStrategy::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_include() -> Vec<String> {
    strings(&[
        "thank you for your application",
        "thank you for applying",
        "application received",
        "your application for",
        "we've received your application",
        "update on your application",
        "regarding your application",
        "interview",
        "shortlisted",
        "internship",
        "service desk",
        "technical support",
        "support analyst",
        "application was sent",
        "your online application has been successfully submitted",
        "help desk analyst",
        "pleased to offer",
        "job offer",
        "offer letter",
    ])
}

fn default_blacklist() -> Vec<String> {
    strings(&[
        "visa",
        "ircc",
        "immigration",
        "30+ new tech internships posted this week",
        "job alert",
        "apply now",
        "sql interview challenge",
        "is hiring",
        "new internships",
        "internship",
        "hiring",
        "job opportunity",
        "one of the first",
        "be a great fit",
        "webinar",
        "newsletter",
        "unsubscribe",
        "career fair",
        "notification",
        "event",
        "first",
        "apply to",
        "actively recruiting",
        "you would be a great fit",
        "and more",
    ])
}

fn default_skip_labels() -> Vec<String> {
    strings(&["DRAFT", "SPAM", "PROMOTIONS", "UPDATES", "SOCIAL"])
}

fn default_body_rejection() -> Vec<String> {
    strings(&[
        "decided to move forward with other candidates",
        "decided to pursue other candidates",
        "decided not to move forward",
        "will not be moving forward",
        "not be moving forward with your application",
        "regret to inform you",
        "position has been filled",
        "we are unable to offer you",
        "you have not been selected",
        "candidates whose qualifications more closely",
    ])
}

fn default_rejection() -> Vec<String> {
    strings(&[
        "rejected",
        "unsuccessful",
        "not selected",
        "not moving forward",
        "not proceeding",
        "thank you for the interest",
    ])
}

fn default_offer() -> Vec<String> {
    strings(&["offer", "congratulations", "welcome aboard", "pleased to offer"])
}

fn default_interview() -> Vec<String> {
    strings(&[
        "interview",
        "shortlisted",
        "next round",
        "next steps",
        "assessment",
    ])
}

fn default_company_patterns() -> Vec<String> {
    strings(&[
        r#"(?i)\bat\s+["']?([\w\s&\-.]+?)["']?(?:$|:|\.|\s\()"#,
        r#"(?i)\bfrom\s+["']?([\w\s&\-.]+?)["']?(?:$|:|\.|\s\()"#,
    ])
}

fn default_title_patterns() -> Vec<String> {
    strings(&[
        r#"(?i)\bfor\s+["']?(.+?)["']?\s+at\b"#,
        r#"(?i)\bapplication\s+for\s+["']?(.+?)["']?(?:\s+at\b|\s+[-|(]|\s*:|\s*$)"#,
        r#"(?i)\bre:\s+["']?(.+?)["']?\s+application\b"#,
        r#"(?i)\bposition:\s*["']?(.+?)["']?\s*$"#,
    ])
}

fn default_boilerplate() -> Vec<String> {
    strings(&[
        "at {company}",
        "from {company}",
        "thank you for applying to",
        "thank you for applying for",
        "thank you for applying",
        "thank you for your application to",
        "thank you for your application for",
        "thank you for your application",
        "thanks for applying to",
        "thanks for applying",
        "we've received your application for",
        "we've received your application",
        "your application was sent to",
        "your application for",
        "your application to",
        "application received",
        "application for",
        "application to",
        "re:",
        "fwd:",
        "fw:",
    ])
}
