//! Resume template.
//!
//! Sections appear in a fixed order and only when they have content:
//! Professional Summary, Key Skills, Work Experience, Projects, Certifications,
//! Languages, Education.

use crate::models::resume::ResumeRecord;
use crate::render::flow::{layout, Banner, Block, Grid, RenderedDocument};
use crate::render::theme::{
    palette, PageGeometry, Stroke, BANNER_NAME, BANNER_WIDTH, BODY, BULLET, CELL, CONTACT,
    PROJECT_NAME, SECTION_HEADER, SUBTLE,
};

pub const SKILL_COLUMNS: usize = 3;
const SKILL_COLUMN_WIDTH: f32 = 150.0;

/// Contact details printed under the name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeHeader<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Present contact parts joined with `" | "`; `None` when there are none.
pub fn contact_line(email: Option<&str>, phone: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [email, phone]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" | "))
}

/// Chunks skills into rows of [`SKILL_COLUMNS`], right-padding the last row with
/// empty cells so every row has exactly that many.
pub fn skill_rows(skills: &[String]) -> Vec<Vec<String>> {
    skills
        .chunks(SKILL_COLUMNS)
        .map(|chunk| {
            let mut row = chunk.to_vec();
            row.resize(SKILL_COLUMNS, String::new());
            row
        })
        .collect()
}

/// `"{a} — {b}"`, tolerating either side being absent.
fn dash_join(left: Option<&str>, right: Option<&str>) -> String {
    format!(
        "{} \u{2014} {}",
        left.unwrap_or_default(),
        right.unwrap_or_default()
    )
}

fn section(blocks: &mut Vec<Block>, title: &str, rule_width: f32) {
    blocks.push(Block::paragraph(title, SECTION_HEADER));
    blocks.push(Block::Rule(Stroke {
        color: palette::RULE,
        width: rule_width,
    }));
    blocks.push(Block::Spacer(6.0));
}

fn bullet_list(items: &[String]) -> Block {
    Block::BulletList {
        items: items.to_vec(),
        style: BULLET,
        bullet_color: palette::RULE,
    }
}

/// Builds the block sequence for a resume.
pub fn resume_blocks(header: &ResumeHeader<'_>, resume: &ResumeRecord) -> Vec<Block> {
    let mut blocks = Vec::new();

    let mut banner_rows = vec![(
        format!("{} \u{2014} Resume", header.full_name),
        BANNER_NAME,
    )];
    if let Some(contact) = contact_line(header.email, header.phone) {
        banner_rows.push((contact, CONTACT));
    }
    blocks.push(Block::Banner(Banner {
        rows: banner_rows,
        width: BANNER_WIDTH,
        padding: 10.0,
        background: palette::BANNER,
        border: Stroke {
            color: palette::RULE,
            width: 0.5,
        },
    }));
    blocks.push(Block::Spacer(20.0));

    if let Some(summary) = resume.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        section(&mut blocks, "Professional Summary", 1.0);
        blocks.push(Block::paragraph(summary, BODY));
    }

    if !resume.skills.is_empty() {
        blocks.push(Block::Spacer(10.0));
        section(&mut blocks, "Key Skills", 1.2);
        blocks.push(Block::Grid(Grid {
            rows: skill_rows(&resume.skills),
            col_width: SKILL_COLUMN_WIDTH,
            style: CELL,
            padding: 4.0,
            fill: palette::CELL_FILL,
            lines: Stroke {
                color: palette::GRID,
                width: 0.5,
            },
        }));
    }

    if !resume.experience.is_empty() {
        section(&mut blocks, "Work Experience", 1.0);
        for exp in &resume.experience {
            let mut heading = dash_join(exp.title.as_deref(), exp.company.as_deref());
            if let Some(location) = exp.location.as_deref() {
                heading.push_str(", ");
                heading.push_str(location);
            }
            blocks.push(Block::paragraph(heading, BODY));
            if let Some(dates) = exp.dates.as_deref() {
                blocks.push(Block::paragraph(dates, SUBTLE));
            }
            if !exp.bullets.is_empty() {
                blocks.push(bullet_list(&exp.bullets));
            }
        }
    }

    if !resume.projects.is_empty() {
        section(&mut blocks, "Projects", 1.0);
        for project in &resume.projects {
            if let Some(name) = project.name.as_deref() {
                blocks.push(Block::paragraph(name, PROJECT_NAME));
            }
            if let Some(description) = project.description.as_deref() {
                blocks.push(Block::paragraph(description, BODY));
            }
            blocks.push(Block::Spacer(6.0));
        }
    }

    if !resume.certifications.is_empty() {
        section(&mut blocks, "Certifications", 1.0);
        blocks.push(bullet_list(&resume.certifications));
    }

    if !resume.languages.is_empty() {
        section(&mut blocks, "Languages", 1.0);
        blocks.push(bullet_list(&resume.languages));
    }

    if !resume.education.is_empty() {
        section(&mut blocks, "Education", 1.0);
        for edu in &resume.education {
            blocks.push(Block::paragraph(
                dash_join(edu.degree.as_deref(), edu.institution.as_deref()),
                BODY,
            ));
            if let Some(dates) = edu.dates.as_deref() {
                blocks.push(Block::paragraph(dates, SUBTLE));
            }
        }
    }

    blocks
}

/// Lays out a resume on A4 pages.
pub fn render_resume(header: &ResumeHeader<'_>, resume: &ResumeRecord) -> RenderedDocument {
    layout(PageGeometry::A4, &resume_blocks(header, resume))
}
