//! Document assembler – wraps a processed body in the scaffolding of the
//! selected dialect, with optional header and footer images.
//!
//! Everything here is a pure function of its arguments. The MSO conditional
//! comments must stay textually exact: Outlook silently drops a region whose
//! opener or closer is malformed.

use crate::config::{Dialect, EmailTemplateConfig};
use crate::dom::escape_attr;
use crate::policy::{BODY_FONT_SIZE, TEXT_COLOR};

pub const MSO_OPEN: &str = "<!--[if mso]>";
pub const MSO_VML_OPEN: &str = "<!--[if gte mso 9]>";
pub const NOT_MSO_OPEN: &str = "<!--[if !mso]><!-->";
pub const NOT_MSO_CLOSE: &str = "<!--<![endif]-->";
pub const CONDITIONAL_CLOSE: &str = "<![endif]-->";

/// Which end of the email an image block sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Header,
    Footer,
}

impl Slot {
    fn alt(self) -> &'static str {
        match self {
            Slot::Header => "Header",
            Slot::Footer => "Footer",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Slot::Header => "email-header",
            Slot::Footer => "email-footer",
        }
    }
}

/// Build the final document for `config.dialect`.
///
/// `body_markup` is the responsive row markup (from [`crate::rows::to_rows`])
/// or the legacy-rewritten body (from [`crate::legacy::to_legacy`]).
pub fn assemble(config: &EmailTemplateConfig, body_markup: &str) -> String {
    match config.dialect {
        Dialect::Responsive => responsive_document(config, body_markup),
        Dialect::Legacy => legacy_document(config, body_markup),
    }
}

// ---------------------------------------------------------------------------
// Responsive dialect
// ---------------------------------------------------------------------------

fn responsive_document(config: &EmailTemplateConfig, rows: &str) -> String {
    let width = config.max_width;
    let font = &config.font_family;
    let header = config
        .header()
        .map(|src| responsive_image(Slot::Header, src, width))
        .unwrap_or_default();
    let footer = config
        .footer()
        .map(|src| responsive_image(Slot::Footer, src, width))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Email</title>
    <style>
        body {{ margin: 0; padding: 0; background-color: #ffffff; }}
        .email-container {{ max-width: {width}px; margin: 0 auto; background-color: #ffffff; }}
        .email-header img, .email-footer img {{ display: block; width: 100%; max-width: {width}px; height: auto; }}
        .email-content {{ font-family: {font}; font-size: {BODY_FONT_SIZE}; line-height: 1.5; color: {TEXT_COLOR}; }}
        .email-content img {{ max-width: 100%; height: auto; }}
        .email-content a {{ color: #0066cc; }}
        @media only screen and (max-width: {width}px) {{
            .email-content {{ padding: 0 12px; }}
        }}
    </style>
</head>
<body>
    <div class="email-container">{header}
        <div class="email-content">
            <table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0"
                style="max-width: {width}px;">{rows}
            </table>
        </div>{footer}
    </div>
</body>
</html>"#
    )
}

fn responsive_image(slot: Slot, src: &str, width: u32) -> String {
    format!(
        r#"
        <div class="{class}">
            <img src="{src}" width="{width}" alt="{alt}"
                style="display: block; width: 100%; max-width: {width}px; height: auto;" />
        </div>"#,
        class = slot.class(),
        src = escape_attr(src),
        alt = slot.alt(),
    )
}

// ---------------------------------------------------------------------------
// Legacy dialect
// ---------------------------------------------------------------------------

fn legacy_document(config: &EmailTemplateConfig, body: &str) -> String {
    let width = config.max_width;
    let font = &config.font_family;
    let font_attr = escape_attr(font);
    let header = config
        .header()
        .map(|src| legacy_image_row(Slot::Header, src, width))
        .unwrap_or_default();
    let footer = config
        .footer()
        .map(|src| legacy_image_row(Slot::Footer, src, width))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office">
<head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta http-equiv="X-UA-Compatible" content="IE=edge" />
    <meta name="x-apple-disable-message-reformatting" />
    <title>Email</title>
    {MSO_VML_OPEN}
    <xml>
        <o:OfficeDocumentSettings>
            <o:AllowPNG/>
            <o:PixelsPerInch>96</o:PixelsPerInch>
        </o:OfficeDocumentSettings>
    </xml>
    {CONDITIONAL_CLOSE}
    {MSO_OPEN}
    <style type="text/css">
        body, table, td, p, a, li, h1, h2, h3 {{ font-family: {font} !important; }}
        table {{ border-collapse: collapse; mso-table-lspace: 0pt; mso-table-rspace: 0pt; }}
        img {{ -ms-interpolation-mode: bicubic; }}
    </style>
    {CONDITIONAL_CLOSE}
    {NOT_MSO_OPEN}
    <style type="text/css">
        body {{ margin: 0; padding: 0; -webkit-text-size-adjust: 100%; -ms-text-size-adjust: 100%; }}
        img {{ border: 0; outline: none; text-decoration: none; max-width: 100%; height: auto; }}
        @media only screen and (max-width: {width}px) {{
            .email-wrapper {{ width: 100% !important; }}
        }}
    </style>
    {NOT_MSO_CLOSE}
</head>
<body style="margin: 0; padding: 0; background-color: #ffffff;">
<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: #ffffff;">
    <tr>
        <td align="center" style="padding: 0;">
            {MSO_OPEN}
            <table role="presentation" width="{width}" align="center" cellpadding="0" cellspacing="0" border="0">
            <tr><td>
            {CONDITIONAL_CLOSE}
            <table role="presentation" class="email-wrapper" width="100%" cellpadding="0" cellspacing="0" border="0"
                style="max-width: {width}px; margin: 0 auto;">{header}
                <tr>
                    <td style="font-family: {font_attr}; font-size: {BODY_FONT_SIZE}; color: {TEXT_COLOR}; mso-line-height-rule: exactly; line-height: 150%; padding: 10px 0;">
{body}
                    </td>
                </tr>{footer}
            </table>
            {MSO_OPEN}
            </td></tr>
            </table>
            {CONDITIONAL_CLOSE}
        </td>
    </tr>
</table>
</body>
</html>"#
    )
}

/// Image row with a VML fill for Outlook. The VML region opens right before
/// the `<img>` and closes right after it, so the image sits inside the
/// textbox of the filled rectangle.
fn legacy_image_row(slot: Slot, src: &str, width: u32) -> String {
    let src = escape_attr(src);
    let alt = slot.alt();
    format!(
        r#"
                <!-- {alt} Image -->
                <tr>
                    <td style="margin: 0; padding: 0;">
                        {MSO_VML_OPEN}<v:rect xmlns:v="urn:schemas-microsoft-com:vml" fill="true" stroke="false" style="width: {width}px;"><v:fill type="frame" src="{src}" /><v:textbox inset="0,0,0,0" style="mso-fit-shape-to-text: true;">{CONDITIONAL_CLOSE}<img src="{src}" width="{width}" alt="{alt}" border="0"
                            style="display: block; width: 100%; max-width: {width}px; height: auto; border: 0; outline: none; text-decoration: none;" />{MSO_VML_OPEN}</v:textbox></v:rect>{CONDITIONAL_CLOSE}
                    </td>
                </tr>"#
    )
}
