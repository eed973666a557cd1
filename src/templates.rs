//! Sample body fragments for testing and demonstration.
//!
//! Each body is the kind of HTML the editor hands to the transpiler.

/// The smallest useful body: one heading and one paragraph.
pub fn minimal_body() -> &'static str {
    r#"<h1>Welcome aboard</h1><p>Thanks for signing up. We are glad to have you.</p>"#
}

/// Newsletter body with headings, formatted paragraphs, links, and lists.
pub fn newsletter_body() -> &'static str {
    r##"
<h1>Monthly Update</h1>
<p>Hello <strong>team</strong>, here is what happened in <em>March</em>.</p>
<h2>Highlights</h2>
<ul>
    <li>Shipped the new onboarding flow</li>
    <li>Closed <b>42</b> support tickets</li>
    <li>Read the <a href="https://example.com/notes">release notes</a></li>
</ul>
<h3>Next steps</h3>
<ol>
    <li>Review the roadmap</li>
    <li>Book the <u>quarterly</u> planning session</li>
</ol>
<p style="text-align: center;">See you next month!</p>
"##
}

/// Body with editor image blocks: a container `<div>` carrying the
/// alignment and an `<img>` sized by inline style.
pub fn image_body() -> &'static str {
    r##"
<h2>Product spotlight</h2>
<div style="text-align: center;" data-alignment="center" data-width="400"><img src="data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==" alt="Spotlight" style="width: 400px; height: auto;"></div>
<p>Our newest release in one picture.</p>
<div data-alignment="right"><img src="https://example.com/badge.png" width="120"></div>
"##
}

/// Output shaped like a converted word-processor document: bare paragraphs,
/// inline formatting, and an ordered list.
pub fn imported_body() -> &'static str {
    r##"<h1>Quarterly Report</h1><p>Revenue grew <strong>12%</strong> over the previous quarter.</p><p><em>Prepared by the finance team.</em></p><h2>Summary</h2><ol><li>Costs held flat</li><li>Headcount up by three</li></ol><p>Questions go to <a href="mailto:finance@example.com">finance@example.com</a>.</p>"##
}

/// Every element the style policy knows about.
pub fn all_elements_body() -> &'static str {
    r##"
<h1>Heading 1</h1>
<h2>Heading 2</h2>
<h3>Heading 3</h3>
<p>Paragraph with <strong>strong</strong>, <b>bold</b>, <em>em</em>, <i>italic</i>,
<u>underline</u>, <span>span</span> and a <a href="https://example.com">link</a>.<br>Second line.</p>
<p style="text-align: right; color: #555555;">Right-aligned paragraph with an author colour.</p>
<ul>
    <li>Unordered item</li>
</ul>
<ol>
    <li>Ordered item</li>
</ol>
<div style="text-align: left;"><img src="pic.png" style="width: 180px;"></div>
<div>Plain container</div>
"##
}

/// All sample bodies with their names.
pub fn all_bodies() -> Vec<(&'static str, &'static str)> {
    vec![
        ("minimal", minimal_body()),
        ("newsletter", newsletter_body()),
        ("image", image_body()),
        ("imported", imported_body()),
        ("all_elements", all_elements_body()),
    ]
}
