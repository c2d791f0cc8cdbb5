//! Rule catalog for the prompt quality scorer.
//!
//! Every rule is an independent, pure check over the raw prompt text. Cue
//! vocabularies are bilingual: the Chinese cues match verbatim, the English
//! ones case-insensitively on word boundaries.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::quality::models::{Category, Verdict};

/// A named, weighted check. The catalog below is fixed at compile time.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub weight: f64,
    pub check: fn(&str) -> Verdict,
}

/// Read-only view of a rule, as listed over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub weight: f64,
}

impl Rule {
    pub fn evaluate(&self, text: &str) -> Verdict {
        (self.check)(text)
    }

    pub fn info(&self) -> RuleInfo {
        RuleInfo {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            weight: self.weight,
        }
    }
}

pub static RULES: [Rule; 7] = [
    Rule {
        id: "length_check",
        name: "Length reasonableness",
        description: "Prompt is neither too short nor too long",
        category: Category::Completeness,
        weight: 10.0,
        check: check_length,
    },
    Rule {
        id: "clear_instruction",
        name: "Instruction clarity",
        description: "Contains an explicit action verb and definite wording",
        category: Category::Clarity,
        weight: 20.0,
        check: check_clear_instruction,
    },
    Rule {
        id: "specificity_check",
        name: "Specificity",
        description: "States output format, constraints and examples",
        category: Category::Specificity,
        weight: 20.0,
        check: check_specificity,
    },
    Rule {
        id: "context_check",
        name: "Context sufficiency",
        description: "Provides background, a role and a target audience",
        category: Category::Context,
        weight: 15.0,
        check: check_context,
    },
    Rule {
        id: "structure_check",
        name: "Structural clarity",
        description: "Organizes long prompts with headings, numbering and separators",
        category: Category::Structure,
        weight: 15.0,
        check: check_structure,
    },
    Rule {
        id: "positive_instruction",
        name: "Positive instruction framing",
        description: "Says what to do rather than what to avoid",
        category: Category::Clarity,
        weight: 10.0,
        check: check_positive_instruction,
    },
    Rule {
        id: "framework_usage",
        name: "Structured-framework usage",
        description: "Uses a structured prompt framework such as CO-STAR or RTF",
        category: Category::Structure,
        weight: 10.0,
        check: check_framework_usage,
    },
];

const MIN_LENGTH: usize = 50;
const MAX_LENGTH: usize = 2000;

/// Section keywords of the CO-STAR, RTF and CRISPE frameworks.
const FRAMEWORK_KEYWORDS: &[&str] = &[
    "context",
    "objective",
    "style",
    "tone",
    "audience",
    "response",
    "role",
    "task",
    "format",
    "capacity",
    "insight",
    "statement",
    "personality",
    "experiment",
];

fn cue(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rule cue pattern must compile")
}

static ACTION_VERBS: Lazy<Regex> = Lazy::new(|| {
    cue(r"分析|生成|创建|写|总结|解释|比较|评估|设计|计算|翻译|优化|(?i:\b(?:analy[sz]e|generate|create|write|summari[sz]e|explain|compare|evaluate|design|calculate|translate|optimi[sz]e)\b)")
});
static HEDGING: Lazy<Regex> =
    Lazy::new(|| cue(r"可能|也许|大概|(?i:\b(?:maybe|possibly|perhaps|probably)\b)"));
static FORMAT_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"格式|列表|表格|JSON|段落|字数|长度|(?i:json|markdown|\b(?:format|list|table|paragraphs?|bullet points?|word count)\b)")
});
static CONSTRAINT_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"要求|限制|条件|标准|规范|(?i:\b(?:requirements?|limits?|constraints?|conditions?|standards?|criteria)\b)")
});
static EXAMPLE_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"例如|比如|示例|例子|(?i:\b(?:for example|for instance|such as|examples?)\b|\be\.g\.)")
});
static BACKGROUND_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"背景|环境|情况|场景|目的|目标|(?i:\b(?:background|scenario|situation|goal|purpose)\b)")
});
static ROLE_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"你是|作为|角色|专家|助手|(?i:\b(?:you are|act as|as an?|persona|expert|assistant)\b)")
});
static AUDIENCE_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"受众|用户|读者|观众|目标人群|(?i:\b(?:audience|readers?|users?|viewers?)\b)")
});
static CONTENT_CREATION: Lazy<Regex> = Lazy::new(|| {
    cue(r"写|创建|生成.*文|(?i:\b(?:write|compose|draft)\b|\bcreate\b.*\b(?:article|post|story|essay|copy|content)\b)")
});
static HEADERS: Lazy<Regex> = Lazy::new(|| cue(r"#{1,6}|【|】|\[|\]"));
static NUMBERING: Lazy<Regex> = Lazy::new(|| {
    cue(r"\d+\.|第.*步|首先|然后|最后|(?i:\b(?:first(?:ly)?|then|next|finally|step \d+)\b)")
});
static SEPARATORS: Lazy<Regex> = Lazy::new(|| cue(r"---|###|==="));
static NEGATIVE_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"不要|别|禁止|避免|不能|不可|不应该|(?i:\b(?:don[’']t|do not|never|avoid|must not|cannot|can[’']t|shouldn[’']t|should not)\b)")
});
static POSITIVE_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"请|应该|需要|要求|希望|(?i:\b(?:please|need to|make sure|ensure)\b)")
});
// `neg` captures the negated forms so they are not read as positive.
static SHOULD: Lazy<Regex> = Lazy::new(|| cue(r"(?i)\bshould(?P<neg>n[’']t| not)?\b"));

fn has_positive_cue(text: &str) -> bool {
    POSITIVE_CUES.is_match(text)
        || SHOULD
            .captures_iter(text)
            .any(|caps| caps.name("neg").is_none())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Collects issue/suggestion pairs while deducting from a starting score.
struct Findings {
    score: f64,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    fn starting_at(score: f64) -> Self {
        Self {
            score,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn flag(&mut self, penalty: f64, issue: &str, suggestion: &str) {
        self.score -= penalty;
        self.issues.push(issue.to_string());
        self.suggestions.push(suggestion.to_string());
    }

    fn into_verdict(self) -> Verdict {
        Verdict::new(self.score, self.issues, self.suggestions)
    }
}

fn check_length(text: &str) -> Verdict {
    let length = char_len(text.trim());
    let mut findings = Findings::starting_at(100.0);

    if length < MIN_LENGTH {
        findings.flag(
            70.0,
            "Prompt is too short and may lack necessary information",
            "Add background information, concrete requirements or examples",
        );
    } else if length > MAX_LENGTH {
        findings.flag(
            40.0,
            "Prompt is too long and may confuse the model",
            "Split the task into steps or use a prompt chain",
        );
    }

    findings.into_verdict()
}

fn check_clear_instruction(text: &str) -> Verdict {
    let mut findings = Findings::starting_at(100.0);

    let has_action_verb = ACTION_VERBS.is_match(text);
    let has_question = text.contains('?') || text.contains('？');

    if !has_action_verb && !has_question {
        findings.flag(
            40.0,
            "No clear action instruction",
            "Add an explicit action verb such as \"analyze\" or \"generate\"",
        );
    }
    if HEDGING.is_match(text) {
        findings.flag(
            20.0,
            "Contains vague wording",
            "Use definite language instead of words like \"maybe\" or \"possibly\"",
        );
    }

    findings.into_verdict()
}

fn check_specificity(text: &str) -> Verdict {
    let mut findings = Findings::starting_at(100.0);

    if !FORMAT_CUES.is_match(text) {
        findings.flag(
            25.0,
            "Output format is not specified",
            "State the expected output format, e.g. a list, paragraphs or JSON",
        );
    }
    if !CONSTRAINT_CUES.is_match(text) {
        findings.flag(
            25.0,
            "No concrete constraints",
            "Add requirements such as a length limit or a quality standard",
        );
    }
    if char_len(text) > 200 && !EXAMPLE_CUES.is_match(text) {
        findings.flag(
            15.0,
            "Complex task without examples",
            "Provide a concrete example for complex tasks",
        );
    }

    findings.into_verdict()
}

fn check_context(text: &str) -> Verdict {
    let mut findings = Findings::starting_at(100.0);

    if !BACKGROUND_CUES.is_match(text) {
        findings.flag(
            30.0,
            "Missing background information",
            "Describe the task background and the relevant environment",
        );
    }
    if char_len(text) > 100 && !ROLE_CUES.is_match(text) {
        findings.flag(
            20.0,
            "The model's role is not defined",
            "Assign the model an explicit role or persona",
        );
    }
    if CONTENT_CREATION.is_match(text) && !AUDIENCE_CUES.is_match(text) {
        findings.flag(
            15.0,
            "Content-creation task without a target audience",
            "Describe who the content is written for",
        );
    }

    findings.into_verdict()
}

fn check_structure(text: &str) -> Verdict {
    let length = char_len(text);
    let mut findings = Findings::starting_at(100.0);

    if length > 300 && !HEADERS.is_match(text) && !NUMBERING.is_match(text) {
        findings.flag(
            30.0,
            "Long prompt lacks clear structure",
            "Organize the content with headings, numbering or separators",
        );
    }
    if length > 500 && !SEPARATORS.is_match(text) {
        findings.flag(
            20.0,
            "Complex prompt lacks separators",
            "Separate sections with delimiters such as --- or ###",
        );
    }

    findings.into_verdict()
}

fn check_positive_instruction(text: &str) -> Verdict {
    let mut findings = Findings::starting_at(100.0);

    if NEGATIVE_CUES.is_match(text) {
        if has_positive_cue(text) {
            findings.flag(
                20.0,
                "Contains negative instructions",
                "Prefer positive phrasing where possible",
            );
        } else {
            findings.flag(
                40.0,
                "Relies on negative instructions",
                "Rephrase as positive instructions that say what the model should do",
            );
        }
    }

    findings.into_verdict()
}

fn check_framework_usage(text: &str) -> Verdict {
    let lower = text.to_lowercase();
    if FRAMEWORK_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Verdict::new(100.0, vec![], vec![]);
    }

    // Optional for short prompts: a baseline that fails without a heavy penalty.
    let mut findings = Findings::starting_at(70.0);
    if char_len(text) > 400 {
        findings.flag(
            10.0,
            "Long prompt without a structured framework",
            "Consider a structured framework such as CO-STAR or RTF",
        );
    } else {
        findings.flag(
            0.0,
            "No structured prompt framework",
            "A framework such as CO-STAR or RTF makes intent explicit",
        );
    }
    findings.into_verdict()
}
