//! Server-rendered page. Each component is a plain function writing markup.

use std::fmt::Write;

use chrono::{DateTime, Datelike, Utc};

use super::RenderBranch;
use crate::models::Restaurant;

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:linear-gradient(135deg,#fffbeb,#ffedd5,#fee2e2);min-height:100vh;display:flex;flex-direction:column;color:#44403c}
header{background:#c2410c;color:#fff;padding:1.5rem 1rem;text-align:center}
header h1{margin:0;font-size:2rem}
header p{margin:.25rem 0 0;opacity:.9}
main{flex:1;max-width:72rem;width:100%;margin:0 auto;padding:2rem 1rem;box-sizing:border-box}
footer{background:#292524;color:#d6d3d1;text-align:center;padding:1rem;font-size:.875rem}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:1.5rem}
.card{background:#fff;border-radius:.75rem;overflow:hidden;box-shadow:0 4px 12px rgba(0,0,0,.1)}
.card img{width:100%;height:12rem;object-fit:cover;display:block}
.card .body{padding:1rem}
.card h2{margin:0 0 .5rem;font-size:1.25rem;color:#9a3412}
.badge{display:inline-block;background:#fed7aa;color:#7c2d12;border-radius:999px;padding:.1rem .6rem;font-size:.75rem;margin-right:.5rem}
.address{font-size:.875rem;color:#78716c}
.center{text-align:center;padding:2.5rem 0}
.spinner{width:3rem;height:3rem;border:4px solid #fed7aa;border-top-color:#c2410c;border-radius:50%;margin:0 auto 1rem;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.error{background:#fef2f2;border:1px solid #fca5a5;border-radius:.75rem;padding:1.5rem;max-width:36rem;margin:0 auto;text-align:center}
.error h2{color:#b91c1c;margin-top:0}
.error button{background:#c2410c;color:#fff;border:0;border-radius:.5rem;padding:.5rem 1.25rem;font-size:1rem;cursor:pointer}
.overlay{position:fixed;inset:0;background:rgba(0,0,0,.75);display:flex;align-items:center;justify-content:center;padding:1rem;z-index:50}
"#;

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full HTML document for the given branch
pub fn render_page(branch: &RenderBranch, updated_at: Option<DateTime<Utc>>) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str("<title>Bistro Picks</title>\n");
    // Re-poll while a fetch is in flight.
    if matches!(branch, RenderBranch::Loading) {
        page.push_str("<meta http-equiv=\"refresh\" content=\"2\">\n");
    }
    let _ = write!(page, "<style>{}</style>\n</head>\n<body>\n", STYLE);

    page.push_str(&header());
    page.push_str("<main>\n");
    page.push_str(&render_branch(branch));
    page.push_str("</main>\n");
    page.push_str(&footer(Utc::now(), updated_at));
    page.push_str("</body>\n</html>\n");
    page
}

/// Markup for the `<main>` contents of one branch
pub fn render_branch(branch: &RenderBranch) -> String {
    match branch {
        RenderBranch::ConfigOverlay { message } => {
            format!(
                "<div class=\"overlay\">\n{}</div>\n",
                error_display(message, false)
            )
        }
        RenderBranch::Loading => loading_indicator(),
        RenderBranch::Error {
            message,
            show_retry,
        } => error_display(message, *show_retry),
        RenderBranch::Empty => empty_state(),
        RenderBranch::List { restaurants } => restaurant_list(restaurants),
    }
}

fn header() -> String {
    "<header>\n<h1>Bistro Picks</h1>\n<p>AI-curated restaurant recommendations</p>\n</header>\n"
        .to_string()
}

fn footer(now: DateTime<Utc>, updated_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::from("<footer>\n");
    let _ = writeln!(
        out,
        "<p>&copy; {} Bistro Picks. Recommendations powered by Google Gemini.</p>",
        now.year()
    );
    if let Some(updated) = updated_at {
        let _ = writeln!(
            out,
            "<p>Last updated {}</p>",
            updated.format("%Y-%m-%d %H:%M UTC")
        );
    }
    out.push_str("</footer>\n");
    out
}

fn loading_indicator() -> String {
    "<div class=\"center\" role=\"status\">\n<div class=\"spinner\"></div>\n\
     <p>Finding delicious recommendations...</p>\n</div>\n"
        .to_string()
}

fn error_display(message: &str, show_retry: bool) -> String {
    let mut out = String::from("<div class=\"error\" role=\"alert\">\n<h2>Something went wrong</h2>\n");
    let _ = writeln!(out, "<p>{}</p>", escape(message));
    if show_retry {
        out.push_str(
            "<form method=\"post\" action=\"/retry\"><button type=\"submit\">Try Again</button></form>\n",
        );
    }
    out.push_str("</div>\n");
    out
}

fn empty_state() -> String {
    "<div class=\"center\">\n<p>No recommendations available at the moment.</p>\n\
     <p>Try refreshing or check back later.</p>\n</div>\n"
        .to_string()
}

fn restaurant_list(restaurants: &[Restaurant]) -> String {
    let mut out = String::from("<section class=\"grid\">\n");
    for restaurant in restaurants {
        out.push_str(&restaurant_card(restaurant));
    }
    out.push_str("</section>\n");
    out
}

fn restaurant_card(restaurant: &Restaurant) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<article class=\"card\" id=\"r-{}\">", escape(&restaurant.id));
    let _ = writeln!(
        out,
        "<img src=\"https://picsum.photos/seed/{}/400/300\" alt=\"{}\" loading=\"lazy\">",
        escape(&restaurant.id),
        escape(&restaurant.image_prompt)
    );
    out.push_str("<div class=\"body\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&restaurant.name));
    let _ = writeln!(
        out,
        "<p><span class=\"badge\">{}</span><span class=\"badge\">{}</span></p>",
        escape(&restaurant.cuisine),
        escape(&restaurant.price_range)
    );
    let _ = writeln!(out, "<p>{}</p>", escape(&restaurant.description));
    let _ = writeln!(out, "<p class=\"address\">{}</p>", escape(&restaurant.address));
    out.push_str("</div>\n</article>\n");
    out
}
