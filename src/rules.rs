//! Topic rule table for the scripted assistant.
//!
//! Pure data: an ordered list of keyword predicates with canned responses,
//! evaluated top-to-bottom. The first satisfied rule wins; declaration order
//! is priority order. A single fallback response covers everything else.

use regex::Regex;

/// Fallback reply when no rule fires.
const FALLBACK: &str = "I'm not sure I understood that. I can help with topics like \
     phishing, strong passwords, malware, two-factor authentication, VPNs, and \
     keeping your family safe online. Try asking about one of those.";

/// Starter questions surfaced by the consumer as suggestion chips.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What is phishing?",
    "How can I create a strong password?",
    "Is this website safe to use?",
    "What should I do if I clicked on a suspicious link?",
    "How can I protect my children online?",
    "What is two-factor authentication?",
];

/// A single topic rule.
///
/// Every pattern must match for the rule to fire (logical AND); each pattern
/// is an alternation over keywords (logical OR). Patterns are written in
/// lowercase and matched against normalized input.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Short topic label, used for logging.
    pub topic: &'static str,
    /// Compiled keyword patterns; all must match.
    pub patterns: Vec<Regex>,
    /// Canned reply returned when the rule fires.
    pub response: &'static str,
}

impl Rule {
    fn new(topic: &'static str, patterns: &[&str], response: &'static str) -> Self {
        Self {
            topic,
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
            response,
        }
    }

    /// Whether this rule fires for the given normalized input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().all(|re| re.is_match(normalized))
    }
}

/// Ordered rule table plus fallback.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    fallback: &'static str,
}

impl RuleTable {
    /// Create the built-in topic table.
    pub fn default_rules() -> Self {
        let rules = vec![
            Rule::new(
                "phishing",
                &[r"\bphish"],
                "Phishing is when attackers pretend to be someone you trust, like your \
                 bank or a delivery service, to trick you into revealing passwords or \
                 card details. Watch for urgent language, unexpected attachments, and \
                 sender addresses that almost match the real thing. When in doubt, go \
                 to the site directly instead of clicking the link.",
            ),
            Rule::new(
                "passwords",
                &[r"\bpassword|\bpassphrase"],
                "A strong password is at least 12 characters long and mixes upper and \
                 lower case letters, numbers, and symbols. Avoid dictionary words and \
                 personal details like birthdays. Better yet, use a password manager \
                 to generate and store a unique password for every account.",
            ),
            Rule::new(
                "website-safety",
                &[
                    r"\bwebsite\b|\bweb ?page\b|\bsite\b|\burl\b",
                    r"\bsafe\b|\bsecure\b|\blegit|\btrust",
                ],
                "Check for https and a padlock icon in the address bar, and look \
                 closely for spelling tricks in the domain name. Be wary of deals \
                 that look too good to be true. A quick search for the site name plus \
                 the word scam often reveals known problems.",
            ),
            Rule::new(
                "clicked-link",
                &[r"\bclick", r"\blink\b|\bsuspicious\b|\battachment\b"],
                "Don't panic. Disconnect from the network, don't enter any \
                 credentials on the page that opened, and run a full antivirus scan. \
                 Then change the passwords for any accounts that may be exposed, \
                 starting with your email, and enable two-factor authentication \
                 wherever you can.",
            ),
            Rule::new(
                "child-protection",
                &[r"\bchild|\bkid\b|\bkids\b|\bson\b|\bdaughter\b|\bparent"],
                "Keep the conversation open: talk with your children about what they \
                 do online and who they talk to. Use parental controls and privacy \
                 settings on their devices, keep screens in shared spaces, and agree \
                 on rules for sharing personal information and photos.",
            ),
            Rule::new(
                "two-factor-authentication",
                &[r"\b2fa\b|\bmfa\b|two.?factor|multi.?factor|\bone.?time code\b"],
                "Two-factor authentication adds a second step to login, usually a \
                 code from an app or a text message, so a stolen password alone is \
                 not enough to break in. Turn it on for email, banking, and social \
                 media first. Authenticator apps are safer than SMS codes where you \
                 have the choice.",
            ),
            Rule::new(
                "malware",
                &[r"\bmalware\b|\bvirus|\bransomware\b|\btrojan\b|\bspyware\b"],
                "Malware is malicious software that infects your device to steal \
                 data, spy on you, or hold your files for ransom. Keep your system \
                 and apps updated, install software only from official stores, and \
                 run a reputable antivirus. If you suspect an infection, disconnect \
                 from the internet and run a full scan.",
            ),
            Rule::new(
                "social-engineering",
                &[r"social engineering|\bmanipulat|\bimpersonat|\bpretext"],
                "Social engineering is manipulating people into giving up \
                 confidential information, no hacking required. Attackers exploit \
                 trust and urgency over the phone, by email, or in person. Slow \
                 down, verify identities through a separate channel, and never share \
                 codes or passwords with anyone who asks for them.",
            ),
            Rule::new(
                "vpn",
                &[r"\bvpn\b|virtual private network"],
                "A VPN encrypts your internet traffic and hides your IP address, \
                 which is especially useful on public Wi-Fi. It will not make you \
                 anonymous or block malware by itself, so treat it as one layer of \
                 protection among many. Pick a provider with a clear no-logs policy.",
            ),
        ];

        Self {
            rules,
            fallback: FALLBACK,
        }
    }

    /// Create an empty table (for testing). Everything resolves to fallback.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: FALLBACK,
        }
    }

    /// First rule satisfied by the normalized input, if any.
    pub fn first_match(&self, normalized: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }

    /// The fallback reply.
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::default_rules()
    }
}
