//! Property identifiers known to the cascade.

// Generate `PropertyId` together with its name, inheritance and early-group tables.
macro_rules! properties {
    (
        $($variant:ident => $name:literal, inherited: $inherited:literal, early: $early:literal;)*
    ) => {
        /// A CSS 2 longhand property (plus generated `content`).
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum PropertyId {
            $($variant,)*
        }

        impl PropertyId {
            /// Every property, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// CSS name of the property.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Look a property up by its CSS name, ASCII case-insensitively.
            pub fn from_name(name: &str) -> Option<Self> {
                match name.to_ascii_lowercase().as_str() {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Whether the property inherits by default.
            pub const fn is_inherited(self) -> bool {
                match self {
                    $(Self::$variant => $inherited,)*
                }
            }

            /// Early properties are applied before all others so that em units and
            /// `currentcolor` see the element's final font and colour.
            pub const fn is_early(self) -> bool {
                match self {
                    $(Self::$variant => $early,)*
                }
            }
        }
    };
}

properties! {
    // Font and colour (early)
    Color => "color", inherited: true, early: true;
    FontFamily => "font-family", inherited: true, early: true;
    FontSize => "font-size", inherited: true, early: true;
    FontStyle => "font-style", inherited: true, early: true;
    FontVariant => "font-variant", inherited: true, early: true;
    FontWeight => "font-weight", inherited: true, early: true;

    // Background
    BackgroundAttachment => "background-attachment", inherited: false, early: false;
    BackgroundColor => "background-color", inherited: false, early: false;
    BackgroundImage => "background-image", inherited: false, early: false;
    BackgroundPosition => "background-position", inherited: false, early: false;
    BackgroundRepeat => "background-repeat", inherited: false, early: false;

    // Borders
    BorderCollapse => "border-collapse", inherited: true, early: false;
    BorderSpacing => "border-spacing", inherited: true, early: false;
    BorderTopColor => "border-top-color", inherited: false, early: false;
    BorderRightColor => "border-right-color", inherited: false, early: false;
    BorderBottomColor => "border-bottom-color", inherited: false, early: false;
    BorderLeftColor => "border-left-color", inherited: false, early: false;
    BorderTopStyle => "border-top-style", inherited: false, early: false;
    BorderRightStyle => "border-right-style", inherited: false, early: false;
    BorderBottomStyle => "border-bottom-style", inherited: false, early: false;
    BorderLeftStyle => "border-left-style", inherited: false, early: false;
    BorderTopWidth => "border-top-width", inherited: false, early: false;
    BorderRightWidth => "border-right-width", inherited: false, early: false;
    BorderBottomWidth => "border-bottom-width", inherited: false, early: false;
    BorderLeftWidth => "border-left-width", inherited: false, early: false;
    OutlineColor => "outline-color", inherited: false, early: false;
    OutlineStyle => "outline-style", inherited: false, early: false;
    OutlineWidth => "outline-width", inherited: false, early: false;

    // Box
    Display => "display", inherited: false, early: false;
    Position => "position", inherited: false, early: false;
    Float => "float", inherited: false, early: false;
    Clear => "clear", inherited: false, early: false;
    Top => "top", inherited: false, early: false;
    Right => "right", inherited: false, early: false;
    Bottom => "bottom", inherited: false, early: false;
    Left => "left", inherited: false, early: false;
    ZIndex => "z-index", inherited: false, early: false;
    Width => "width", inherited: false, early: false;
    Height => "height", inherited: false, early: false;
    MinWidth => "min-width", inherited: false, early: false;
    MinHeight => "min-height", inherited: false, early: false;
    MaxWidth => "max-width", inherited: false, early: false;
    MaxHeight => "max-height", inherited: false, early: false;
    MarginTop => "margin-top", inherited: false, early: false;
    MarginRight => "margin-right", inherited: false, early: false;
    MarginBottom => "margin-bottom", inherited: false, early: false;
    MarginLeft => "margin-left", inherited: false, early: false;
    PaddingTop => "padding-top", inherited: false, early: false;
    PaddingRight => "padding-right", inherited: false, early: false;
    PaddingBottom => "padding-bottom", inherited: false, early: false;
    PaddingLeft => "padding-left", inherited: false, early: false;
    Overflow => "overflow", inherited: false, early: false;
    Visibility => "visibility", inherited: true, early: false;
    VerticalAlign => "vertical-align", inherited: false, early: false;

    // Text
    Direction => "direction", inherited: true, early: false;
    UnicodeBidi => "unicode-bidi", inherited: false, early: false;
    LetterSpacing => "letter-spacing", inherited: true, early: false;
    WordSpacing => "word-spacing", inherited: true, early: false;
    LineHeight => "line-height", inherited: true, early: false;
    TextAlign => "text-align", inherited: true, early: false;
    TextDecoration => "text-decoration", inherited: false, early: false;
    TextIndent => "text-indent", inherited: true, early: false;
    TextTransform => "text-transform", inherited: true, early: false;
    WhiteSpace => "white-space", inherited: true, early: false;

    // Lists and tables
    ListStyleImage => "list-style-image", inherited: true, early: false;
    ListStylePosition => "list-style-position", inherited: true, early: false;
    ListStyleType => "list-style-type", inherited: true, early: false;
    CaptionSide => "caption-side", inherited: true, early: false;
    EmptyCells => "empty-cells", inherited: true, early: false;
    TableLayout => "table-layout", inherited: false, early: false;

    // Generated content and UI
    Content => "content", inherited: false, early: false;
    Cursor => "cursor", inherited: true, early: false;
}
