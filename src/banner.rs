//! Startup banner and farewell summary.

use std::path::Path;

use crate::brewer::TokenUsage;
use crate::consts::{AUTHOR, REPO, format_number};

/// Session configuration shown in the startup banner.
pub struct BannerInfo<'a> {
    pub text_model: &'a str,
    pub image_model: &'a str,
    pub auth_status: &'a str,
    pub image_dir: &'a Path,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          ☕  M O O D B R E W           ║
   ║    a drink for whatever you feel      ║
   ╚═══════════════════════════════════════╝

   version   {}
   text      {}
   image     {}
   auth      {}
   images    {}

   Crafted with AI by {}  ·  {}
   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        info.text_model,
        info.image_model,
        info.auth_status,
        info.image_dir.display(),
        AUTHOR,
        REPO,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

/// Drinks brewed and token usage, then goodbye.
pub fn render_session_summary(brews: u64, usage: TokenUsage) -> String {
    let mut out = String::new();
    if brews > 0 {
        let noun = if brews == 1 { "drink" } else { "drinks" };
        out.push_str(&format!("brewed {} {noun}\n", format_number(brews)));
    }
    if usage.total() > 0 {
        out.push_str(&format!(
            "session: {:>6} input + {:>6} output = {:>6} tokens\n",
            format_number(usage.input_tokens),
            format_number(usage.output_tokens),
            format_number(usage.total()),
        ));
    }
    out.push_str("goodbye.");
    out
}

pub fn print_session_summary(brews: u64, usage: TokenUsage) {
    println!("{}", render_session_summary(brews, usage));
}
