// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for the book surface and the chrome around it.

## Organization

- **Palette**: Base colors (paper, ink, spine)
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Book geometry
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use flipbook::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let veil = Color {
    a: opacity::OVERLAY_SUBTLE,
    ..palette::INK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    // Book materials
    pub const PAPER: Color = Color::from_rgb(0.992, 0.980, 0.953);
    pub const PAPER_DIM: Color = Color::from_rgb(0.945, 0.925, 0.886);
    pub const PAGE_EDGE: Color = Color::from_rgb(0.902, 0.878, 0.835);
    pub const INK: Color = Color::from_rgb(0.176, 0.153, 0.133);
    pub const INK_MUTED: Color = Color::from_rgb(0.455, 0.420, 0.384);
    pub const SPINE: Color = Color::from_rgb(0.788, 0.757, 0.706);
    pub const DESK_LIGHT: Color = Color::from_rgb(0.933, 0.918, 0.894);
    pub const DESK_DARK: Color = Color::from_rgb(0.129, 0.122, 0.118);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;

    /// Shading beside the spine, at its darkest edge.
    pub const SPINE_SHADE: f32 = 0.12;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XS: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Widest the open book is drawn.
    pub const BOOK_MAX_WIDTH: f32 = 900.0;

    /// Width to height ratio of the open book.
    pub const BOOK_ASPECT: f32 = 68.0 / 42.6;

    /// Room kept free around the book for the page edges and shadow.
    pub const BOOK_MARGIN: f32 = 48.0;

    /// Smallest book still drawn; narrower windows show an empty surface.
    pub const BOOK_MIN_WIDTH: f32 = 120.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Page text.
    pub const PAGE_BODY: f32 = 18.0;

    /// Standard UI text.
    pub const BODY: f32 = 14.0;

    /// Page numbers and hints.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Under the whole book.
    pub const BOOK: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 24.0,
    };

    /// Under the active page resting on the right.
    pub const ACTIVE_PAGE: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.18),
        offset: Vector { x: 4.0, y: 4.0 },
        blur_radius: 12.0,
    };

    /// Under a leaf while it turns.
    pub const TURNING_PAGE: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        offset: Vector { x: 0.0, y: 6.0 },
        blur_radius: 18.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::MD > spacing::XS);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::SPINE_SHADE > 0.0 && opacity::SPINE_SHADE < 1.0);

    assert!(sizing::BOOK_MAX_WIDTH > sizing::BOOK_MIN_WIDTH);
    assert!(sizing::BOOK_ASPECT > 1.0);

    assert!(typography::PAGE_BODY > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
};
