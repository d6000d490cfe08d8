//! HTML templates for web interface
//!
//! Simple inline HTML templates without a template engine.

use turnstile::Profile;

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 640px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    .info-row {
        margin: 10px 0;
        padding: 8px;
        background: #f9f9f9;
        border-radius: 4px;
    }
    .label {
        font-weight: bold;
        color: #666;
        display: inline-block;
        width: 120px;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="password"] {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    .logout-btn {
        background: #999;
        float: right;
    }
    .empty {
        color: #999;
        font-style: italic;
    }
"#;

/// Wrap `body` in the shared page chrome.
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Turnstile - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>"#
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"        <form method="POST" action="{action}">
            <div class="form-group">
                <label for="username">Username:</label>
                <input type="text" id="username" name="username" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">{submit}</button>
        </form>"#
    )
}

/// Render the login page
pub fn login_page() -> String {
    let form = credentials_form("/login", "Login");
    page(
        "Login",
        &format!(
            r#"        <h1>Login</h1>
{form}
        <p>Don't have an account? <a href="/register">Register here</a></p>"#
        ),
    )
}

/// Render the registration page
pub fn register_page() -> String {
    let form = credentials_form("/register", "Create Account");
    page(
        "Register",
        &format!(
            r#"        <h1>Create Account</h1>
{form}
        <p>Already have an account? <a href="/login">Login here</a></p>"#
        ),
    )
}

/// Render the profile page for a signed-in user
pub fn profile_page(user: &Profile, active_users: &[String]) -> String {
    let list = user_list(active_users);
    page(
        "Profile",
        &format!(
            r#"        <form method="POST" action="/logout">
            <button type="submit" class="logout-btn">Logout</button>
        </form>
        <h1>Profile</h1>
        <div class="info-row"><span class="label">Username:</span> {username}</div>
        <div class="info-row"><span class="label">User ID:</span> <code>{id}</code></div>
        <h2>Active Users</h2>
{list}
        <p class="empty">Logging out deletes your account.</p>"#,
            username = html_escape(&user.username),
            id = html_escape(user.id.as_str()),
        ),
    )
}

/// Render the public list of active users
pub fn active_users_page(active_users: &[String]) -> String {
    let list = user_list(active_users);
    page(
        "Active Users",
        &format!(
            r#"        <h1>Active Users</h1>
{list}
        <p><a href="/profile">Your profile</a></p>"#
        ),
    )
}

fn user_list(usernames: &[String]) -> String {
    if usernames.is_empty() {
        return r#"        <p class="empty">Nobody is logged in.</p>"#.to_string();
    }
    let items: String = usernames
        .iter()
        .map(|name| format!("            <li>{}</li>\n", html_escape(name)))
        .collect();
    format!("        <ul>\n{items}        </ul>")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
