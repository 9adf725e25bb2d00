use ratatui::style::Color;

/// Snake and food colours. The scheme shifts as the game speeds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
}

impl Palette {
    pub fn for_score(score: u32) -> Self {
        match score {
            50.. => Self {
                snake: Color::Rgb(0xe8, 0x33, 0x26),
                food: Color::Rgb(0xe8, 0xa1, 0x26),
            },
            25.. => Self {
                snake: Color::Rgb(0x26, 0xe8, 0x57),
                food: Color::Rgb(0xd2, 0xe8, 0x26),
            },
            _ => Self {
                snake: Color::Rgb(0xff, 0x00, 0xff),
                food: Color::Rgb(0x00, 0xff, 0xff),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_tiers() {
        assert_eq!(Palette::for_score(0), Palette::for_score(24));
        assert_ne!(Palette::for_score(24), Palette::for_score(25));
        assert_eq!(Palette::for_score(25), Palette::for_score(49));
        assert_ne!(Palette::for_score(49), Palette::for_score(50));
        assert_eq!(Palette::for_score(50).snake, Color::Rgb(0xe8, 0x33, 0x26));
    }
}
