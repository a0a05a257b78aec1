//! Visual language shared by the resume and cover letter templates:
//! page geometry, palette and the paragraph style sheet.

use crate::render::font_metrics::FontFace;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Components scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn components(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

pub mod palette {
    use super::Color;

    pub const BANNER: Color = Color::hex(0x154360);
    pub const ACCENT: Color = Color::hex(0x1A5276);
    pub const RULE: Color = Color::hex(0x2874A6);
    pub const BODY: Color = Color::hex(0x2C3E50);
    pub const CELL_TEXT: Color = Color::hex(0x212F3D);
    pub const SUBTLE: Color = Color::hex(0x7D7D7D);
    pub const GRID: Color = Color::hex(0xAAB7B8);
    pub const CELL_FILL: Color = Color::hex(0xF5F5F5);
    pub const CONTACT: Color = Color::hex(0xD6EAF8);
    pub const FOOTER: Color = Color::hex(0x555555);
    pub const WHITE: Color = Color::hex(0xFFFFFF);
}

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Baseline of the page-number footer, measured from the bottom edge.
    pub footer_baseline: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 40.0,
        footer_baseline: 15.0,
    };

    pub fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn frame_top(&self) -> f32 {
        self.height - self.margin
    }

    pub fn frame_bottom(&self) -> f32 {
        self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Paragraph style. Sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub leading: f32,
    pub color: Color,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub align: Align,
}

impl TextStyle {
    const fn base(face: FontFace, size: f32, leading: f32, color: Color) -> Self {
        Self {
            face,
            size,
            leading,
            color,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            align: Align::Left,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style sheet
// ────────────────────────────────────────────────────────────────────────────

pub const BANNER_WIDTH: f32 = 480.0;
pub const FOOTER_SIZE: f32 = 9.0;

pub const BANNER_NAME: TextStyle = TextStyle {
    align: Align::Center,
    ..TextStyle::base(FontFace::Bold, 26.0, 30.0, palette::WHITE)
};

pub const BANNER_TITLE: TextStyle = TextStyle {
    leading: 32.0,
    ..BANNER_NAME
};

pub const CONTACT: TextStyle = TextStyle {
    align: Align::Center,
    ..TextStyle::base(FontFace::Regular, 11.0, 14.0, palette::CONTACT)
};

pub const SECTION_HEADER: TextStyle = TextStyle {
    space_before: 20.0,
    space_after: 6.0,
    ..TextStyle::base(FontFace::Bold, 14.0, 18.0, palette::ACCENT)
};

pub const BODY: TextStyle = TextStyle {
    space_after: 6.0,
    ..TextStyle::base(FontFace::Regular, 11.0, 16.0, palette::BODY)
};

pub const PROJECT_NAME: TextStyle = TextStyle {
    face: FontFace::Bold,
    color: palette::ACCENT,
    space_after: 4.0,
    ..BODY
};

pub const BULLET: TextStyle = TextStyle {
    left_indent: 14.0,
    ..TextStyle::base(FontFace::Regular, 11.0, 16.0, palette::BODY)
};

pub const SUBTLE: TextStyle = TextStyle::base(FontFace::Oblique, 9.0, 12.0, palette::SUBTLE);

pub const CELL: TextStyle = TextStyle {
    align: Align::Center,
    ..TextStyle::base(FontFace::Regular, 9.0, 12.0, palette::CELL_TEXT)
};

pub const LETTER_BODY: TextStyle = TextStyle {
    space_after: 12.0,
    ..TextStyle::base(FontFace::Regular, 11.0, 18.0, palette::BODY)
};

pub const LETTER_SIGN: TextStyle = TextStyle {
    space_after: 10.0,
    ..TextStyle::base(FontFace::Bold, 11.0, 18.0, palette::ACCENT)
};

pub const LETTER_SUBTLE: TextStyle =
    TextStyle::base(FontFace::Oblique, 10.0, 14.0, palette::SUBTLE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_components() {
        let c = Color::hex(0x154360);
        assert_eq!((c.r, c.g, c.b), (0x15, 0x43, 0x60));
        assert_eq!(palette::WHITE.components(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_a4_frame() {
        let g = PageGeometry::A4;
        assert!((g.frame_width() - 515.28).abs() < 1e-3);
        assert!(g.frame_top() > g.frame_bottom());
        assert!(BANNER_WIDTH <= g.frame_width());
    }
}
