//! Mobile menu toggle buttons.
//!
//! A toggle is a pure function of the viewport, its target panel and its variant.
//! On desktop nothing is rendered at all, so the button takes no space in the layout.
//! On mobile the open button always stays in the page, which keeps the page shape
//! stable whether the panel is open or not.

use minijinja::{context, AutoEscape, Environment};

/// Viewports at least this wide are classified as desktop.
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

const ICON_SIZE: u32 = 25;

const TOGGLE_TEMPLATE_NAME: &str = "toggle.html";

const TOGGLE_TEMPLATE: &str = r#"<button class="{{ classes }}" data-action="{{ action }}">
{%- if icon %}<img src="{{ icon.src }}" alt="{{ icon.alt }}" width="{{ icon.width }}" height="{{ icon.height }}">
{%- else %}{{ glyph }}{% endif -%}
</button>"#;

/// Measured screen size, as reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDimensions {
    pub width: u32,
}

impl ScreenDimensions {
    pub fn is_desktop(&self) -> bool {
        self.width >= DESKTOP_MIN_WIDTH
    }
}

/// Viewport classification, derived once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    /// Classify a viewport. Unknown dimensions render as mobile.
    pub fn classify(dimensions: Option<ScreenDimensions>) -> Self {
        match dimensions {
            Some(d) if d.is_desktop() => Viewport::Desktop,
            _ => Viewport::Mobile,
        }
    }
}

/// Panel a toggle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleTarget {
    Sidebar,
    Filter,
}

impl ToggleTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sidebar" => Some(ToggleTarget::Sidebar),
            "filter" => Some(ToggleTarget::Filter),
            _ => None,
        }
    }

    fn icon_src(&self) -> &'static str {
        match self {
            ToggleTarget::Sidebar => "/code-collabo/hamburger.png",
            ToggleTarget::Filter => "/code-collabo/menu.png",
        }
    }

    fn action(&self) -> &'static str {
        match self {
            ToggleTarget::Sidebar => "toggle-sidebar",
            ToggleTarget::Filter => "toggle-filter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleVariant {
    Open,
    Close,
}

impl ToggleVariant {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ToggleVariant::Open),
            "close" => Some(ToggleVariant::Close),
            _ => None,
        }
    }
}

/// Button body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleContent {
    Icon {
        src: &'static str,
        alt: &'static str,
        width: u32,
        height: u32,
    },
    Glyph(&'static str),
}

/// A rendered toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub classes: Vec<&'static str>,
    /// Client-side action fired on click
    pub action: &'static str,
    pub content: ToggleContent,
}

impl ToggleButton {
    /// Render as an HTML fragment. Every interpolated value is HTML-escaped.
    pub fn to_html(&self) -> Result<String, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template(TOGGLE_TEMPLATE_NAME, TOGGLE_TEMPLATE)?;

        let (icon, glyph) = match &self.content {
            ToggleContent::Icon {
                src,
                alt,
                width,
                height,
            } => (Some(context! { src, alt, width, height }), None),
            ToggleContent::Glyph(glyph) => (None, Some(*glyph)),
        };

        let template = env.get_template(TOGGLE_TEMPLATE_NAME)?;
        template.render(context! {
            classes => self.classes.join(" "),
            action => self.action,
            icon,
            glyph,
        })
    }
}

/// Render a toggle, or nothing on desktop.
pub fn render_toggle(
    viewport: Viewport,
    target: ToggleTarget,
    variant: ToggleVariant,
) -> Option<ToggleButton> {
    if viewport == Viewport::Desktop {
        return None;
    }

    let button = match variant {
        ToggleVariant::Close => {
            let mut classes = vec!["app__menubar__toggle__close"];
            if target == ToggleTarget::Filter {
                classes.push("lib__position-toggle-left");
            }
            ToggleButton {
                classes,
                action: target.action(),
                content: ToggleContent::Glyph("<"),
            }
        }
        ToggleVariant::Open => ToggleButton {
            classes: vec!["app__mobile-menu-btns"],
            action: target.action(),
            content: ToggleContent::Icon {
                src: target.icon_src(),
                alt: "hamburger-icon",
                width: ICON_SIZE,
                height: ICON_SIZE,
            },
        },
    };

    Some(button)
}
