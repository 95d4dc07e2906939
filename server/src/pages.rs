//! Inline HTML page templates.
//!
//! The whole site is rendered from string templates sharing one chrome
//! (header, nav, footer); there is no template engine. User-supplied
//! values are escaped before interpolation.

use eventify_core::catalog::{self, Category, ShowcaseEvent};

/// Escape a user-supplied value for HTML interpolation.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Wrap page content in the shared site chrome.
pub fn render_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{title}</title>
<link href="https://fonts.googleapis.com/css2?family=Poppins:wght@400;600&display=swap" rel="stylesheet" />
<style>
  body {{ margin:0; font-family:'Poppins',sans-serif; background:white; color:#333; }}
  header {{ background:#2E7D32; color:white; text-align:center; padding:20px; font-size:2em; font-weight:600; }}
  nav {{ background:#388E3C; display:flex; justify-content:center; gap:20px; padding:10px; }}
  nav a {{ color:white; text-decoration:none; font-weight:500; }}
  nav a:hover {{ text-decoration:underline; }}
  main {{ padding:40px; text-align:center; min-height:70vh; }}
  .btn {{ display:inline-block; background:#2E7D32; color:white; padding:12px 25px; border-radius:6px; text-decoration:none; margin-top:20px; border:none; font-size:1em; cursor:pointer; }}
  .btn:hover {{ background:#1B5E20; }}
  .category-grid {{ display:grid; grid-template-columns:repeat(auto-fit,minmax(250px,1fr)); gap:25px; margin-top:30px; }}
  .category {{ border-radius:12px; overflow:hidden; box-shadow:0 4px 10px rgba(0,0,0,0.15); transition:0.3s; }}
  .category:hover {{ transform:scale(1.05); }}
  .category img {{ width:100%; height:180px; object-fit:cover; }}
  .category h3 {{ margin:0; padding:10px; background:#2E7D32; color:white; }}
  footer {{ background:#f2f2f2; text-align:center; padding:20px; margin-top:40px; }}
  form {{ display:flex; flex-direction:column; align-items:center; gap:10px; }}
  input, textarea, select {{ padding:10px; width:250px; border-radius:5px; border:1px solid #ccc; }}
  textarea {{ height:100px; resize:none; }}
</style>
</head>
<body>
<header>Event Management</header>
<nav>
<a href="/">Home</a>
<a href="/categories">Categories</a>
<a href="/events/previous">Previous Events</a>
<a href="/events/upcoming">Upcoming Events</a>
<a href="/payment">Payment</a>
<a href="/feedback">Feedback</a>
<a href="/login">Login/Signup</a>
</nav>
<main>{content}</main>
<footer>
<p><b>Contact us:</b> +91 9876543210 | eventify@gmail.com</p>
<p>123 Celebration Street, Hyderabad, India</p>
</footer>
</body>
</html>"#
    )
}

pub fn home() -> String {
    render_page(
        "Home",
        r#"
<h2>Welcome to Eventify - Your Event, Our Expertise</h2>
<p>Plan, manage, and celebrate all types of events effortlessly.</p>
<a href="/login" class="btn">Get Started</a>
"#,
    )
}

pub fn login() -> String {
    render_page(
        "Login/Signup",
        r#"
<h2>Login</h2>
<form action="/login" method="post">
  <input type="email" name="email" placeholder="Email" required />
  <input type="password" name="password" placeholder="Password" required />
  <button type="submit" class="btn">Login</button>
</form>
<h2>New here? Sign up</h2>
<form action="/signup" method="post">
  <input type="text" name="name" placeholder="Full Name" required />
  <input type="email" name="email" placeholder="Email" required />
  <input type="password" name="password" placeholder="Password" required />
  <button type="submit" class="btn">Sign Up</button>
</form>
"#,
    )
}

pub fn categories() -> String {
    let cards: String = catalog::CATEGORIES
        .iter()
        .map(|c| {
            format!(
                r#"
<div class="category">
<a href="/categories/{id}">
<img src="{img}" alt="{name}" />
<h3>{name}</h3>
</a>
</div>"#,
                id = c.id,
                img = c.img,
                name = c.name,
            )
        })
        .collect();
    render_page(
        "Categories",
        &format!(r#"<h2>Explore Event Categories</h2><div class="category-grid">{cards}</div>"#),
    )
}

pub fn category_detail(cat: &Category) -> String {
    render_page(
        cat.name,
        &format!(
            r#"
<h2>{name} Events</h2>
<img src="{img}" alt="{name}" style="width:80%;max-width:700px;border-radius:10px;" />
<p>{desc}</p>
<h3>Requirements &amp; Key Points:</h3>
<ul style="list-style:none;padding:0;">
<li>Venue decoration &amp; lighting</li>
<li>Catering &amp; guest management</li>
<li>Photography &amp; music arrangements</li>
<li>Customer special requests accommodated</li>
</ul>
<a href="/payment" class="btn">Book Now</a>
"#,
            name = cat.name,
            img = cat.img,
            desc = cat.desc,
        ),
    )
}

fn showcase_grid(events: &[ShowcaseEvent]) -> String {
    events
        .iter()
        .map(|e| {
            format!(
                r#"<div class="category"><img src="{img}" alt="{name}"><h3>{name}</h3></div>"#,
                img = e.img,
                name = e.name,
            )
        })
        .collect()
}

pub fn previous_events() -> String {
    let grid = showcase_grid(eventify_core::catalog::PREVIOUS_EVENTS);
    render_page(
        "Previous Events",
        &format!(r#"<h2>Previous Successful Events</h2><div class="category-grid">{grid}</div>"#),
    )
}

pub fn upcoming_events() -> String {
    let grid = showcase_grid(eventify_core::catalog::UPCOMING_EVENTS);
    render_page(
        "Upcoming Events",
        &format!(r#"<h2>Upcoming Events</h2><div class="category-grid">{grid}</div>"#),
    )
}

pub fn payment() -> String {
    let options: String = catalog::CATEGORIES
        .iter()
        .map(|c| format!(r#"<option value="{name}">{name}</option>"#, name = c.name))
        .collect();
    render_page(
        "Payment",
        &format!(
            r#"
<h2>Secure Payment</h2>
<form action="/submit-payment" method="post">
<select name="event" required>
<option value="">Select Event Category</option>
{options}
</select>
<input type="text" name="name" placeholder="Full Name" required />
<input type="email" name="email" placeholder="Email" required />
<input type="number" name="amount" placeholder="Amount (₹)" required />
<select name="method" required>
<option value="Card">Card</option>
<option value="UPI">UPI</option>
<option value="NetBanking">Net Banking</option>
</select>
<button type="submit" class="btn">Pay Now</button>
</form>"#
        ),
    )
}

pub fn payment_success(name: &str, event: &str, amount: &str, method: &str) -> String {
    render_page(
        "Payment Success",
        &format!(
            r#"
<h2>Payment Successful!</h2>
<p>Thank you, <b>{name}</b>! Your payment of ₹{amount} for <b>{event}</b> via <b>{method}</b> has been received.</p>
<a href="/feedback" class="btn">Proceed to Feedback</a>"#,
            name = escape(name),
            event = escape(event),
            amount = escape(amount),
            method = escape(method),
        ),
    )
}

pub fn feedback() -> String {
    render_page(
        "Feedback",
        r#"
<h2>Give Your Feedback</h2>
<form action="/submit-feedback" method="post">
<input type="text" name="name" placeholder="Your Name" required />
<textarea name="feedback" placeholder="Write your feedback here..." required></textarea>
<select name="rating" required>
<option value="">Rating</option>
<option>1</option>
<option>2</option>
<option>3</option>
<option>4</option>
<option>5</option>
</select>
<button type="submit" class="btn">Submit Feedback</button>
</form>"#,
    )
}

pub fn feedback_thanks(name: &str, feedback: &str, rating: &str) -> String {
    render_page(
        "Thank You!",
        &format!(
            r#"
<h2>Thank You for Your Feedback!</h2>
<p><b>{name}</b>, we appreciate your feedback:</p>
<blockquote>"{feedback}"</blockquote>
<p>Rating: {rating}</p>
<a href="/" class="btn">Back to Home</a>"#,
            name = escape(name),
            feedback = escape(feedback),
            rating = escape(rating),
        ),
    )
}

/// Simple titled message page, used for signup/login error responses.
pub fn message(title: &str, heading: &str, detail: &str) -> String {
    render_page(
        title,
        &format!(
            r#"
<h2>{heading}</h2>
<p>{detail}</p>
<a href="/login" class="btn">Back to Login</a>"#,
            heading = escape(heading),
            detail = escape(detail),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>&"'</b>"#),
            "&lt;b&gt;&amp;&quot;&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn chrome_wraps_content() {
        let page = render_page("Home", "<h2>hello</h2>");
        assert!(page.contains("<title>Home</title>"));
        assert!(page.contains("<h2>hello</h2>"));
        assert!(page.contains("Event Management"));
    }

    #[test]
    fn categories_page_links_every_category() {
        let page = categories();
        for cat in eventify_core::catalog::CATEGORIES {
            assert!(page.contains(&format!("/categories/{}", cat.id)));
        }
    }

    #[test]
    fn user_input_is_escaped_in_thanks_page() {
        let page = feedback_thanks("<script>", "fine & dandy", "5");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("fine &amp; dandy"));
    }
}
