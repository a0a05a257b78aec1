//! Cover letter template.

use chrono::NaiveDate;

use crate::render::flow::{layout, Banner, Block, RenderedDocument};
use crate::render::resume::contact_line;
use crate::render::theme::{
    palette, PageGeometry, Stroke, BANNER_TITLE, BANNER_WIDTH, LETTER_BODY, LETTER_SIGN,
    LETTER_SUBTLE,
};

/// Sentinel a client may send in place of a real company name.
pub const COMPANY_PLACEHOLDER: &str = "company name";
/// Sentinel a client may send in place of a real location.
pub const LOCATION_PLACEHOLDER: &str = "city, state";

#[derive(Debug, Clone, Copy)]
pub struct CoverLetterInput<'a> {
    pub full_name: &'a str,
    /// Letter body as returned by the model; paragraphs separated by line breaks.
    pub body: &'a str,
    pub job_desc: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub date: NaiveDate,
}

/// Returns the trimmed value unless it is empty or equals `placeholder`
/// ignoring case.
fn real_value<'a>(value: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(placeholder))
}

pub fn salutation(company: Option<&str>) -> String {
    match real_value(company, COMPANY_PLACEHOLDER) {
        Some(company) => format!("Dear {company} Hiring Team,"),
        None => "Dear Hiring Manager,".to_string(),
    }
}

pub fn fallback_paragraph(job_desc: &str) -> String {
    format!(
        "I am writing to express my interest in the {} role. With my background and skills, \
         I am confident I can make a valuable contribution to your team.",
        job_desc
    )
}

/// Splits the body on line breaks, dropping blank lines.
pub fn body_paragraphs(body: &str) -> Vec<&str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// `%B %d, %Y`, e.g. `March 05, 2025`.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn cover_letter_blocks(input: &CoverLetterInput<'_>) -> Vec<Block> {
    let mut blocks = vec![
        Block::Banner(Banner {
            rows: vec![("Cover Letter".to_string(), BANNER_TITLE)],
            width: BANNER_WIDTH,
            padding: 16.0,
            background: palette::BANNER,
            border: Stroke {
                color: palette::RULE,
                width: 0.5,
            },
        }),
        Block::Spacer(20.0),
        Block::paragraph(format_letter_date(input.date), LETTER_SUBTLE),
        Block::Spacer(20.0),
    ];

    let company = real_value(input.company, COMPANY_PLACEHOLDER);
    if let Some(company) = company {
        blocks.push(Block::paragraph(company, LETTER_BODY));
    }
    if let Some(location) = real_value(input.location, LOCATION_PLACEHOLDER) {
        blocks.push(Block::paragraph(location, LETTER_SUBTLE));
    }
    blocks.push(Block::Spacer(16.0));

    blocks.push(Block::paragraph(salutation(company), LETTER_BODY));
    blocks.push(Block::Spacer(12.0));

    let paragraphs = body_paragraphs(input.body);
    if paragraphs.is_empty() {
        blocks.push(Block::paragraph(
            fallback_paragraph(input.job_desc),
            LETTER_BODY,
        ));
    } else {
        blocks.extend(
            paragraphs
                .into_iter()
                .map(|p| Block::paragraph(p, LETTER_BODY)),
        );
    }

    blocks.push(Block::Spacer(20.0));
    blocks.push(Block::paragraph("Sincerely,", LETTER_SIGN));
    blocks.push(Block::Spacer(4.0));
    blocks.push(Block::paragraph(input.full_name, LETTER_SIGN));
    if let Some(contact) = contact_line(input.email, input.phone) {
        blocks.push(Block::paragraph(contact, LETTER_SUBTLE));
    }

    blocks
}

pub fn render_cover_letter(input: &CoverLetterInput<'_>) -> RenderedDocument {
    layout(PageGeometry::A4, &cover_letter_blocks(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(body: &'a str) -> CoverLetterInput<'a> {
        CoverLetterInput {
            full_name: "Ada Lovelace",
            body,
            job_desc: "Backend Engineer",
            email: Some("ada@example.com"),
            phone: None,
            company: None,
            location: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        }
    }

    #[test]
    fn test_salutation_suppresses_placeholder() {
        assert_eq!(salutation(Some("Acme")), "Dear Acme Hiring Team,");
        assert_eq!(salutation(Some("Company Name")), "Dear Hiring Manager,");
        assert_eq!(salutation(Some("COMPANY NAME")), "Dear Hiring Manager,");
        assert_eq!(salutation(Some("")), "Dear Hiring Manager,");
        assert_eq!(salutation(None), "Dear Hiring Manager,");
    }

    #[test]
    fn test_date_format() {
        assert_eq!(
            format_letter_date(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
            "March 05, 2025"
        );
    }

    #[test]
    fn test_body_split_on_line_breaks() {
        assert_eq!(
            body_paragraphs("First.\n\n  Second.  \r\nThird."),
            vec!["First.", "Second.", "Third."]
        );
        assert!(body_paragraphs(" \n\n ").is_empty());
    }

    #[test]
    fn test_placeholder_body_renders_verbatim() {
        let doc = render_cover_letter(&input("Cover letter not available."));
        let texts: Vec<&str> = doc.texts().collect();
        assert!(texts.contains(&"Cover letter not available."));
        assert!(texts.contains(&"Dear Hiring Manager,"));
        assert!(texts.contains(&"March 05, 2025"));
    }

    #[test]
    fn test_empty_body_uses_fallback_paragraph() {
        let blocks = cover_letter_blocks(&input(""));
        let expected = fallback_paragraph("Backend Engineer");
        assert!(blocks
            .iter()
            .any(|b| matches!(b, Block::Paragraph { text, .. } if *text == expected)));
        assert!(expected.starts_with("I am writing to express my interest in the Backend Engineer role."));
    }

    #[test]
    fn test_company_and_location_lines() {
        let mut letter = input("Hello.");
        letter.company = Some("Acme");
        letter.location = Some("Austin, TX");
        let texts: Vec<String> = cover_letter_blocks(&letter)
            .into_iter()
            .filter_map(|b| match b {
                Block::Paragraph { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "March 05, 2025",
                "Acme",
                "Austin, TX",
                "Dear Acme Hiring Team,",
                "Hello.",
                "Sincerely,",
                "Ada Lovelace",
                "ada@example.com",
            ]
        );
    }

    #[test]
    fn test_placeholder_location_suppressed() {
        let mut letter = input("Hello.");
        letter.location = Some("City, State");
        let has_location = cover_letter_blocks(&letter)
            .iter()
            .any(|b| matches!(b, Block::Paragraph { text, .. } if text == "City, State"));
        assert!(!has_location);
    }

    #[test]
    fn test_signature_follows_body() {
        let doc = render_cover_letter(&input("One.\nTwo."));
        let texts: Vec<&str> = doc.texts().collect();
        let two = texts.iter().position(|t| *t == "Two.").unwrap();
        let sign = texts.iter().position(|t| *t == "Sincerely,").unwrap();
        let name = texts.iter().position(|t| *t == "Ada Lovelace").unwrap();
        assert!(two < sign && sign < name);
    }
}
