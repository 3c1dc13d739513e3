//! Terminal text style and the tag vocabulary that changes it.
//!
//! A [`TermStyle`] is the state threaded through word wrapping: every tag
//! the wrapper meets produces a new style for the tag's content.

use bitflags::bitflags;
use crossterm::style::Attribute;
use log::warn;

use crate::color::Color;

bitflags! {
    /// Text style modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKE = 1 << 4;
        const REVERSE = 1 << 5;
    }
}

impl Modifiers {
    /// The modifier a tag character switches on, if any.
    ///
    /// - `*` bold
    /// - `~` dim
    /// - `/` italic
    /// - `_` underline
    /// - `-` strikethrough
    /// - `!` reverse video
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '*' => Some(Self::BOLD),
            '~' => Some(Self::DIM),
            '/' => Some(Self::ITALIC),
            '_' => Some(Self::UNDERLINE),
            '-' => Some(Self::STRIKE),
            '!' => Some(Self::REVERSE),
            _ => None,
        }
    }

    /// The crossterm attributes that draw these modifiers.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        [
            (Self::BOLD, Attribute::Bold),
            (Self::DIM, Attribute::Dim),
            (Self::ITALIC, Attribute::Italic),
            (Self::UNDERLINE, Attribute::Underlined),
            (Self::STRIKE, Attribute::CrossedOut),
            (Self::REVERSE, Attribute::Reverse),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, attribute)| attribute)
    }
}

/// Tag that sets the foreground color from its attribute: `[<red>c text]`.
pub const FOREGROUND_TAG: char = 'c';
/// Tag that sets the background color from its attribute: `[<blue>h text]`.
pub const BACKGROUND_TAG: char = 'h';

/// Complete terminal style: colors and modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TermStyle {
    /// Foreground (text) color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Text style modifiers.
    pub modifiers: Modifiers,
}

impl TermStyle {
    /// Returns true if nothing is set.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// The style for the content of a tag opened in this style.
    ///
    /// Unknown tags, and color tags whose attribute is missing or not a
    /// color, leave the style unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkwrap::{Color, Modifiers, TermStyle};
    ///
    /// let style = TermStyle::default()
    ///     .enter_tag('*', None)
    ///     .enter_tag('c', Some("#00ff00"));
    /// assert!(style.modifiers.contains(Modifiers::BOLD));
    /// assert_eq!(style.fg, Some(Color::Rgb(0, 255, 0)));
    /// ```
    pub fn enter_tag(&self, tag: char, attribute: Option<&str>) -> TermStyle {
        if let Some(modifier) = Modifiers::from_tag(tag) {
            return TermStyle {
                modifiers: self.modifiers | modifier,
                ..*self
            };
        }

        match tag {
            FOREGROUND_TAG => TermStyle {
                fg: self.color_from(tag, attribute).or(self.fg),
                ..*self
            },
            BACKGROUND_TAG => TermStyle {
                bg: self.color_from(tag, attribute).or(self.bg),
                ..*self
            },
            _ => *self,
        }
    }

    fn color_from(&self, tag: char, attribute: Option<&str>) -> Option<Color> {
        let Some(attribute) = attribute else {
            warn!("color tag {tag:?} without an attribute");
            return None;
        };
        Color::parse(attribute)
            .inspect_err(|err| warn!("ignoring color tag {tag:?}: {err}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color as TermColor;

    #[test]
    fn modifier_tags_accumulate() {
        let style = TermStyle::default()
            .enter_tag('*', None)
            .enter_tag('/', None)
            .enter_tag('_', None);
        assert_eq!(
            style.modifiers,
            Modifiers::BOLD | Modifiers::ITALIC | Modifiers::UNDERLINE
        );
        assert!(style.fg.is_none());
    }

    #[test]
    fn color_tags() {
        let style = TermStyle::default()
            .enter_tag('c', Some("red"))
            .enter_tag('h', Some("blue"));
        assert_eq!(style.fg, Some(Color::Palette(TermColor::DarkRed)));
        assert_eq!(style.bg, Some(Color::Palette(TermColor::DarkBlue)));
    }

    #[test]
    fn inner_color_overrides_outer() {
        let style = TermStyle::default()
            .enter_tag('c', Some("red"))
            .enter_tag('c', Some("#000"));
        assert_eq!(style.fg, Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn bad_color_keeps_current() {
        let red = TermStyle::default().enter_tag('c', Some("red"));
        assert_eq!(red.enter_tag('c', Some("nope")), red);
        assert_eq!(red.enter_tag('c', None), red);
    }

    #[test]
    fn unknown_tag_is_ignored() {
        let style = TermStyle::default().enter_tag('*', None);
        assert_eq!(style.enter_tag('?', Some("x")), style);
        assert_eq!(style.enter_tag('+', None), style);
    }

    #[test]
    fn attributes_for_modifiers() {
        let attrs: Vec<Attribute> = (Modifiers::BOLD | Modifiers::STRIKE).attributes().collect();
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::CrossedOut]);
        assert!(TermStyle::default().is_plain());
    }
}
