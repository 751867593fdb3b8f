//! Prompt templates for LLM-backed extraction.

/// JSON shape every extraction prompt asks for.
const RESPONSE_FORMAT: &str = r#"[
  {
    "name": "test name",
    "value": 12.5,
    "unit": "unit",
    "status": "low|normal|high"
  }
]"#;

/// System prompt shared by all extraction requests.
pub fn system_prompt() -> &'static str {
    r#"You read medical laboratory reports and list the tests they contain.

You never invent tests that are not in the report. When a value is unreadable,
leave the test out. You answer with a JSON array only, no prose and no markdown."#
}

/// Prompt for extracting tests from report text.
pub fn text_extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract the medical tests from this report text.

## Report Text
"{}"

## Instructions
- Correct misspelled test names and status words (hemglobin -> hemoglobin, hgh -> high, lo -> low)
- Values are plain numbers: drop thousands separators
- Standardize units (g/dl -> g/dL, /ul -> /uL)
- When the report gives no status, infer it from common reference ranges
- Return [] when the text contains no tests

## Response Format
Return ONLY a JSON array:
{}"#,
        text, RESPONSE_FORMAT
    )
}

/// Prompt sent together with an attached report image.
pub fn image_extraction_prompt() -> String {
    format!(
        r#"Read the attached medical report image and extract every test with its value, unit and status.

## Instructions
- Correct misspelled test names and status words (hemglobin -> hemoglobin, hgh -> high)
- Values are plain numbers
- Standardize units (g/dl -> g/dL, /ul -> /uL)
- When the report gives no status, infer it from common reference ranges
- Return [] when the image contains no tests

## Response Format
Return ONLY a JSON array:
{}"#,
        RESPONSE_FORMAT
    )
}
