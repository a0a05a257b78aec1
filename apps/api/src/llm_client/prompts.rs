// Prompt constants for resume and cover letter generation.

/// System instruction carrying the JSON schema contract.
pub const GENERATION_SYSTEM: &str = r#"You are an expert AI resume and cover letter writer.
Return STRICT JSON only. No prose, no markdown. Your task is to make the resume perfect according to the job description given by the user.
Schema:
{
  "resume": {
    "summary": "Concise, compelling professional summary (2-3 sentences, strong action verbs, modern tone)",
    "skills": ["Skill 1", "Skill 2", "... (prioritize technical and soft skills relevant to the job)"],
    "experience": [
      {
        "title": "Job Title",
        "company": "Company Name",
        "location": "City, Country",
        "dates": "Start - End",
        "bullets": [
          "Achievement or responsibility (start with action verb, quantify impact where possible)",
          "Another achievement or responsibility"
        ]
      }
    ],
    "projects": [
      {
        "name": "Project Name",
        "description": "Short description highlighting technologies, impact and your role"
      }
    ],
    "education": [
      {
        "degree": "Degree Name",
        "institution": "Institution Name",
        "dates": "Start - End"
      }
    ],
    "certifications": ["Certification 1", "..."],
    "languages": ["Language 1", "..."]
  },
  "cover_letter": "A detailed, modern cover letter. Open with a personalized hook referencing the company and position, highlight the most relevant skills and achievements with specific examples, use short paragraphs separated by line breaks, and close with a confident call to action. Do not include a salutation such as 'Dear Hiring Manager'."
}
Make the resume and cover letter tailored to the job description."#;

/// User prompt. Replace `{resume_text}` and `{job_desc}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"
Resume (raw):
{resume_text}

Job Description:
{job_desc}

Return ONLY the JSON object described by the schema above.
Place every piece of information in the correct section (skills in skills, experience in experience, and so on).
Use strong action verbs, quantifiable achievements and a confident, professional tone.
For the cover letter, use short paragraphs, a strong opening, specific examples and a confident closing.
"#;

pub fn build_generation_prompt(resume_text: &str, job_desc: &str) -> String {
    fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[("resume_text", resume_text), ("job_desc", job_desc)],
    )
}

/// Substitutes `{name}` placeholders in a single left-to-right pass. Inserted
/// values are never rescanned, so user text containing a placeholder survives
/// verbatim. Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail[1..].find('}').and_then(|close| {
            let name = &tail[1..=close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close + 2))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_and_job() {
        let prompt = build_generation_prompt("Rust dev, 5 years", "Senior Rust Engineer");
        assert!(prompt.contains("Resume (raw):\nRust dev, 5 years"));
        assert!(prompt.contains("Job Description:\nSenior Rust Engineer"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_placeholder_text_in_user_input_is_kept_verbatim() {
        let prompt = build_generation_prompt("I write {job_desc} templates", "Rust {resume_text}");
        assert!(prompt.contains("Resume (raw):\nI write {job_desc} templates\n"));
        assert!(prompt.contains("Job Description:\nRust {resume_text}\n"));
        assert_eq!(prompt.matches("Rust {resume_text}").count(), 1);
    }

    #[test]
    fn test_fill_template_leaves_unknown_braces() {
        assert_eq!(
            fill_template("{a} {b} {", &[("a", "x")]),
            "x {b} {"
        );
    }

    #[test]
    fn test_system_instruction_names_every_section() {
        for key in [
            "\"summary\"",
            "\"skills\"",
            "\"experience\"",
            "\"projects\"",
            "\"education\"",
            "\"certifications\"",
            "\"languages\"",
            "\"cover_letter\"",
        ] {
            assert!(GENERATION_SYSTEM.contains(key), "missing {key}");
        }
    }
}
