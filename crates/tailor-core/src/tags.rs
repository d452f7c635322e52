//! Shortcut builders for every known HTML and SVG element.
//!
//! `tags::button()` is `styled("button")` without the error case.

use crate::builder::Styled;

macro_rules! dom_elements {
    ($($name:ident => $tag:literal),* $(,)?) => {
        /// Tag names with a shortcut builder.
        pub const DOM_ELEMENTS: &[&str] = &[$($tag),*];

        $(
            #[doc = concat!("Builder for `<", $tag, ">`.")]
            pub fn $name() -> Styled {
                Styled::for_tag($tag)
            }
        )*
    };
}

dom_elements! {
    a => "a",
    abbr => "abbr",
    address => "address",
    area => "area",
    article => "article",
    aside => "aside",
    audio => "audio",
    b => "b",
    base => "base",
    bdi => "bdi",
    bdo => "bdo",
    big => "big",
    blockquote => "blockquote",
    body => "body",
    br => "br",
    button => "button",
    canvas => "canvas",
    caption => "caption",
    cite => "cite",
    code => "code",
    col => "col",
    colgroup => "colgroup",
    data => "data",
    datalist => "datalist",
    dd => "dd",
    del => "del",
    details => "details",
    dfn => "dfn",
    dialog => "dialog",
    div => "div",
    dl => "dl",
    dt => "dt",
    em => "em",
    embed => "embed",
    fieldset => "fieldset",
    figcaption => "figcaption",
    figure => "figure",
    footer => "footer",
    form => "form",
    h1 => "h1",
    h2 => "h2",
    h3 => "h3",
    h4 => "h4",
    h5 => "h5",
    h6 => "h6",
    header => "header",
    hgroup => "hgroup",
    hr => "hr",
    html => "html",
    i => "i",
    iframe => "iframe",
    img => "img",
    input => "input",
    ins => "ins",
    kbd => "kbd",
    keygen => "keygen",
    label => "label",
    legend => "legend",
    li => "li",
    link => "link",
    main => "main",
    map => "map",
    mark => "mark",
    menu => "menu",
    menuitem => "menuitem",
    meta => "meta",
    meter => "meter",
    nav => "nav",
    noscript => "noscript",
    object => "object",
    ol => "ol",
    optgroup => "optgroup",
    option => "option",
    output => "output",
    p => "p",
    param => "param",
    picture => "picture",
    pre => "pre",
    progress => "progress",
    q => "q",
    rp => "rp",
    rt => "rt",
    ruby => "ruby",
    s => "s",
    samp => "samp",
    script => "script",
    section => "section",
    select => "select",
    small => "small",
    source => "source",
    span => "span",
    strong => "strong",
    style => "style",
    sub => "sub",
    summary => "summary",
    sup => "sup",
    table => "table",
    tbody => "tbody",
    td => "td",
    textarea => "textarea",
    tfoot => "tfoot",
    th => "th",
    thead => "thead",
    time => "time",
    title => "title",
    tr => "tr",
    track => "track",
    u => "u",
    ul => "ul",
    use_ => "use",
    var => "var",
    video => "video",
    wbr => "wbr",
    circle => "circle",
    clip_path => "clipPath",
    defs => "defs",
    ellipse => "ellipse",
    foreign_object => "foreignObject",
    g => "g",
    image => "image",
    line => "line",
    linear_gradient => "linearGradient",
    marker => "marker",
    mask => "mask",
    path => "path",
    pattern => "pattern",
    polygon => "polygon",
    polyline => "polyline",
    radial_gradient => "radialGradient",
    rect => "rect",
    stop => "stop",
    svg => "svg",
    text => "text",
    tspan => "tspan",
}

/// Whether `tag` is a known built-in element.
pub fn is_dom_element(tag: &str) -> bool {
    DOM_ELEMENTS.contains(&tag)
}
