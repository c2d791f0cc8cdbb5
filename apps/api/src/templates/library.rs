//! Static template library: quick templates for common prompting techniques and
//! skeletons for the structured frameworks (CO-STAR, RTF, TAG, CRISPE, RACE).
//!
//! Bodies use `[slot]` placeholders; see `templates::render`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Quick,
    Framework,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Reasoning,
    Learning,
    Structured,
    Workflow,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: TemplateKind,
    pub category: TemplateCategory,
    pub complexity: Complexity,
    pub use_case: &'static str,
    pub example: &'static str,
    pub body: &'static str,
}

/// Optional filters for `filter`; `None` matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub category: Option<TemplateCategory>,
    pub complexity: Option<Complexity>,
    pub kind: Option<TemplateKind>,
}

impl TemplateFilter {
    fn matches(&self, t: &Template) -> bool {
        self.category.map_or(true, |c| c == t.category)
            && self.complexity.map_or(true, |c| c == t.complexity)
            && self.kind.map_or(true, |k| k == t.kind)
    }
}

pub fn all() -> &'static [Template] {
    &TEMPLATES
}

pub fn find(id: &str) -> Option<&'static Template> {
    all().iter().find(|t| t.id == id)
}

pub fn filter(filter: &TemplateFilter) -> Vec<&'static Template> {
    all().iter().filter(|t| filter.matches(t)).collect()
}

static TEMPLATES: [Template; 13] = [
    Template {
        id: "zero_shot_cot",
        name: "Zero-shot chain of thought",
        description: "Asks the model to reason step by step to improve accuracy",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Reasoning,
        complexity: Complexity::Simple,
        use_case: "Math problems, logical reasoning, decision analysis",
        example: "Compound interest calculation",
        body: "You are an analyst who excels at logical reasoning.

Problem: [describe your problem here]

Let's think about this step by step:

1. First, understand the core of the question
2. Then, identify the key information and constraints
3. Next, work out a solution
4. Finally, verify that the answer is reasonable

Please show your full reasoning.",
    },
    Template {
        id: "few_shot_learning",
        name: "Few-shot learning",
        description: "Guides output format and style through worked examples",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Learning,
        complexity: Complexity::Simple,
        use_case: "Format normalization, style imitation, data conversion",
        example: "Structured data extraction",
        body: "Please process the new input following the format of these examples:

Example 1:
Input: [example input 1]
Output: [normalized output 1]

Example 2:
Input: [example input 2]
Output: [normalized output 2]

Example 3:
Input: [example input 3]
Output: [normalized output 3]

Now process:
Input: [your actual input]
Output:",
    },
    Template {
        id: "self_consistency",
        name: "Self-consistency check",
        description: "Solves the problem several ways and keeps the most consistent answer",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Reasoning,
        complexity: Complexity::Complex,
        use_case: "Critical decisions, complex reasoning, higher accuracy",
        example: "Investment strategy analysis",
        body: "You are a senior expert. Please analyze this problem using 3 different methods:

Problem: [describe your problem in detail]

Method 1 - [first angle of analysis]:
[detailed analysis]
Conclusion: [conclusion of method 1]

Method 2 - [second angle of analysis]:
[detailed analysis]
Conclusion: [conclusion of method 2]

Method 3 - [third angle of analysis]:
[detailed analysis]
Conclusion: [conclusion of method 3]

Synthesis:
Compare the three conclusions, choose the most reasonable and consistent answer, and explain why.",
    },
    Template {
        id: "generated_knowledge",
        name: "Generated knowledge",
        description: "Generates relevant background knowledge first, then answers from it",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Reasoning,
        complexity: Complexity::Medium,
        use_case: "Knowledge-heavy tasks, education, professional consulting",
        example: "Technical solution review",
        body: "About [subject area], please first generate the important background knowledge:

Knowledge generation:
1. Core concepts and definitions
2. Key principles
3. Common application scenarios
4. Best practices
5. Risks and caveats

[generated knowledge]

Now, based on the knowledge above, answer the following question:
[your specific question]

Make sure the answer builds on the knowledge generated above.",
    },
    Template {
        id: "role_persona",
        name: "Expert persona",
        description: "Gives the model a professional identity for expert-level answers",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Structured,
        complexity: Complexity::Medium,
        use_case: "Professional consulting, technical guidance, creative writing",
        example: "Product design consultation",
        body: "# Role
You are a [field] expert with [N years] of experience, previously at [company or project], specializing in [specialty].

# Background
- Education: [relevant education]
- Experience: [relevant work experience]
- Skills: [core skills]
- Track record: [typical projects]

# Task
In your professional capacity, please advise on the following:

[problem description]

# Requirements
1. Apply your domain knowledge and experience
2. Give concrete, actionable recommendations
3. Account for real-world constraints
4. State your professional judgement and recommendation",
    },
    Template {
        id: "prompt_chaining",
        name: "Prompt chaining",
        description: "Breaks a complex task into simple stages completed in order",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Workflow,
        complexity: Complexity::Medium,
        use_case: "Complex projects, data analysis, content production",
        example: "Market research report",
        body: "This is a multi-step task that we will complete in stages:

# Overall goal
[describe the final goal]

# Task breakdown

## Stage 1: [stage name]
**Goal**: [specific goal]
**Input**: [required input]
**Output**: [expected output]
**Requirements**: [specific requirements]

## Stage 2: [stage name]
**Goal**: [specific goal]
**Input**: the output of stage 1
**Output**: [expected output]
**Requirements**: [specific requirements]

## Stage 3: [stage name]
**Goal**: [specific goal]
**Input**: the output of stage 2
**Output**: [final output]
**Requirements**: [specific requirements]

Please complete stage 1 first; I will continue with the next stages based on the result.",
    },
    Template {
        id: "self_correction",
        name: "Self-correction",
        description: "Has the model review and improve its own answer",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Quality,
        complexity: Complexity::Medium,
        use_case: "Content polishing, error checking, quality improvement",
        example: "Document review",
        body: "Please complete the following task:

# Initial task
[describe your task requirements in detail]

---

# Self-review checklist
After your first answer, check it against these standards:

## Content
1. Does it answer every question?
2. Is the information accurate?
3. Is the logic clear and coherent?
4. Is any important information missing?

## Format
1. Does it follow the required format?
2. Is the structure easy to read?
3. Is the wording concise?

## Practicality
1. Are the recommendations actionable?
2. Are real-world constraints considered?
3. Is there enough detail?

# Improved version
If you find any problem, provide an improved version.",
    },
    Template {
        id: "costar_structured",
        name: "CO-STAR structured prompt",
        description: "Fully specifies context, objective, style, tone, audience and response",
        kind: TemplateKind::Quick,
        category: TemplateCategory::Structured,
        complexity: Complexity::Medium,
        use_case: "Content creation, marketing copy, communication",
        example: "Product launch copy",
        body: "# CO-STAR prompt

## Context
**Background**: [task background and environment]
**Current situation**: [current state and starting conditions]

## Objective
**Main goal**: [clear, measurable goal]
**Success criteria**: [how to judge the result]

## Style
**Writing style**: [formal, informal, technical, plain]
**Language**: [concise, detailed, humorous, serious]

## Tone
**Overall tone**: [friendly, professional, authoritative, encouraging]
**Attitude**: [positive, neutral, critical]

## Audience
**Target audience**: [who the readers are]
**Knowledge level**: [expertise and background]
**Focus**: [what the audience cares about most]

## Response
**Output format**: [paragraphs, list, table, JSON]
**Length**: [word count or size limit]
**Structure**: [required organization]",
    },
    Template {
        id: "costar",
        name: "CO-STAR framework",
        description: "Defines rhetorical and stylistic elements; suited to content and marketing",
        kind: TemplateKind::Framework,
        category: TemplateCategory::Structured,
        complexity: Complexity::Medium,
        use_case: "Content creation, marketing, communication copy",
        example: "Write launch copy for a new product",
        body: "## Context
[background information and context of the task]

## Objective
[the specific, measurable goal]

## Style
[writing style, e.g. formal, humorous, technical, academic]

## Tone
[tone of voice, e.g. friendly, professional, encouraging]

## Audience
[audience traits: expertise, background, needs]

## Response
[expected output format and structure: list, paragraphs, JSON, code]",
    },
    Template {
        id: "rtf",
        name: "RTF framework",
        description: "Concise and efficient; suited to clear instructions, lists and summaries",
        kind: TemplateKind::Framework,
        category: TemplateCategory::Structured,
        complexity: Complexity::Simple,
        use_case: "Lists, summaries, simple instructions",
        example: "Generate a product feature list",
        body: "## Role
You are an experienced [field] expert.

## Task
Please complete the following task: [task description]

## Format
Output format: [explicit format, e.g. list, table, JSON]",
    },
    Template {
        id: "tag",
        name: "TAG framework",
        description: "Goal-driven; keeps output aligned with the final objective",
        kind: TemplateKind::Framework,
        category: TemplateCategory::Structured,
        complexity: Complexity::Simple,
        use_case: "Goal-driven tasks, iterative content improvement",
        example: "Draft a study plan",
        body: "## Task
The task to complete is: [detailed task description]

## Action
Steps to carry out the task: [concrete plan of action]

## Goal
The final goal is: [specific success criteria]",
    },
    Template {
        id: "crispe",
        name: "CRISPE framework",
        description: "Multi-dimensional definition of complex tasks; suited to strategy work",
        kind: TemplateKind::Framework,
        category: TemplateCategory::Structured,
        complexity: Complexity::Complex,
        use_case: "Strategic planning, UX design, complex problem analysis",
        example: "Design a user onboarding flow",
        body: "## Capacity
As a [professional role], you have [specific skills and knowledge].

## Role
You act as [specific role].

## Insight
From your experience, the key insight is: [key insight]

## Statement
Problem statement: [clear problem definition]

## Personality
Respond in a [personality trait] manner.

## Experiment
Use [specific methodology] to solve the problem.",
    },
    Template {
        id: "race",
        name: "RACE framework",
        description: "Combines a role with explicit expectations; suited to professional content",
        kind: TemplateKind::Framework,
        category: TemplateCategory::Structured,
        complexity: Complexity::Medium,
        use_case: "Strategy consulting, complex analysis, professional content",
        example: "Market analysis report",
        body: "## Role
You are a [specific professional role] with [relevant experience and credentials].

## Action
Actions to perform: [detailed action plan]

## Context
Background: [relevant context and constraints]

## Expectation
Expected result: [output requirements and success criteria]",
    },
];
