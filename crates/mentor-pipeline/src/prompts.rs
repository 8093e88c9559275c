pub const DEFAULT_LANGUAGE: &str = "Russian";

pub const NO_DESCRIPTION: &str = "(no case description provided; rely on the case title)";

pub const NO_RUBRIC: &str =
    "(no case-specific guidance provided; judge general professional quality: sound reasoning, depth of analysis and practical applicability)";

pub const NO_IDEAL_CONCEPTS: &str = "(no key terms specified for this case)";

pub const OUTPUT_CONTRACT: &str = r#"Score the solution on a 0-10 scale and respond with a single JSON object containing exactly these fields:
- "score": number from 0 to 10, the overall grade
- "criteria": object with numeric keys "logic", "depth" and "practicality", each from 0 to 10
- "verdict": string, exactly one sentence
- "errors": array of strings, what is wrong in the solution
- "missing_points": array of strings, important points the solution left out
- "recommendation": string, one or two sentences on how to reach 10/10
- "ideal_concepts": array of strings, the ideal concepts mentioned, copied verbatim from the key terms list above

If the solution is empty, off-topic or not an attempt at this case, do not refuse: return a score of 0, zero criteria, and explain the problem in "errors"."#;
