/// Values shown on the settings page.
#[derive(Debug, Default)]
pub struct SettingsView {
    pub server: String,
    pub database: String,
    pub username: String,
    pub has_password: bool,
    pub saved: bool,
    pub connected: bool,
    pub error: Option<String>,
}

/// Escapes text for use inside HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, nav: bool, body: &str) -> String {
    let nav = if nav {
        r#"<nav class="topbar">
      <a href="/" class="brand">accessdesk</a>
      <div class="links">
        <a href="/">Users</a>
        <a href="/settings">Settings</a>
        <a href="/logout">Log out</a>
      </div>
    </nav>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - accessdesk</title>
    <link rel="stylesheet" href="/static/css/style.css">
  </head>
  <body>
    {nav}
    <main>
{body}
    </main>
  </body>
</html>
"#,
        title = escape_html(title),
    )
}

#[must_use]
pub fn login_page(error: Option<&str>) -> String {
    let message = match error {
        Some("invalid") => r#"<div class="alert error">Invalid password</div>"#.to_string(),
        Some(other) if !other.is_empty() => {
            format!(r#"<div class="alert error">{}</div>"#, escape_html(other))
        }
        _ => String::new(),
    };

    let body = format!(
        r#"      <section class="card narrow">
        <h1>Sign in</h1>
        {message}
        <form method="post" action="/login">
          <label for="password">Admin password</label>
          <input type="password" id="password" name="password" autofocus required>
          <button type="submit">Sign in</button>
        </form>
      </section>"#
    );

    layout("Sign in", false, &body)
}

#[must_use]
pub fn index_page() -> String {
    let body = r#"      <div class="columns">
        <section class="card" id="users-panel">
          <div class="panel-header">
            <h2>Users</h2>
            <button type="button" id="add-user-btn">Add user</button>
          </div>
          <div class="toolbar">
            <input type="search" id="user-filter" placeholder="Filter by email">
            <select id="user-sort">
              <option value="email:asc">Email A-Z</option>
              <option value="email:desc">Email Z-A</option>
              <option value="id:asc">Oldest first</option>
              <option value="id:desc">Newest first</option>
            </select>
          </div>
          <ul id="users-list" class="list"></ul>
        </section>

        <section class="card" id="access-panel">
          <div class="panel-header">
            <h2>Access for <span id="selected-user-name">-</span></h2>
            <button type="button" id="add-groups-btn" disabled>Add groups</button>
          </div>
          <ul id="access-list" class="list"></ul>
        </section>
      </div>

      <div class="modal" id="user-modal">
        <div class="modal-body">
          <h3 id="user-modal-title">Add user</h3>
          <input type="hidden" id="user-modal-id">
          <label for="user-modal-email">Email</label>
          <input type="email" id="user-modal-email">
          <div class="actions">
            <button type="button" class="secondary" data-close="user-modal">Cancel</button>
            <button type="button" id="user-modal-save">Save</button>
          </div>
        </div>
      </div>

      <div class="modal" id="delete-modal">
        <div class="modal-body">
          <h3>Delete user</h3>
          <input type="hidden" id="delete-user-id">
          <p>Delete <strong id="delete-user-name"></strong> and all of their access?</p>
          <div class="actions">
            <button type="button" class="secondary" data-close="delete-modal">Cancel</button>
            <button type="button" class="danger" id="delete-confirm">Delete</button>
          </div>
        </div>
      </div>

      <div class="modal" id="search-modal">
        <div class="modal-body wide">
          <h3>Add groups</h3>
          <div class="toolbar">
            <input type="search" id="group-search-input" placeholder="Search groups">
            <button type="button" id="group-search-btn">Search</button>
          </div>
          <div id="search-results"></div>
          <div class="actions">
            <button type="button" class="secondary" data-close="search-modal">Cancel</button>
            <button type="button" id="add-selected-btn">Add selected</button>
          </div>
        </div>
      </div>

      <script src="/static/js/app.js"></script>"#;

    layout("Users", true, body)
}

#[must_use]
pub fn settings_page(view: &SettingsView) -> String {
    let mut alerts = String::new();
    if view.saved {
        alerts.push_str(r#"<div class="alert success">Settings saved</div>"#);
    }
    if view.error.as_deref() == Some("connection") {
        alerts.push_str(
            r#"<div class="alert error">Could not connect to the database with these settings</div>"#,
        );
    }

    let status = if view.connected {
        r#"<span class="status ok">Connected</span>"#
    } else {
        r#"<span class="status down">Not connected</span>"#
    };

    let password_hint = if view.has_password {
        "Leave empty to keep the current password"
    } else {
        "No password stored"
    };

    let body = format!(
        r#"      <section class="card narrow">
        <h1>Database settings</h1>
        <p>Status: {status}</p>
        {alerts}
        <form method="post" action="/settings">
          <label for="server">Server</label>
          <input type="text" id="server" name="server" value="{server}" required>
          <label for="database">Database</label>
          <input type="text" id="database" name="database" value="{database}" required>
          <label for="username">Username</label>
          <input type="text" id="username" name="username" value="{username}" autocomplete="off">
          <label for="password">Password</label>
          <input type="password" id="password" name="password" placeholder="{password_hint}" autocomplete="new-password">
          <button type="submit">Save</button>
        </form>
      </section>"#,
        server = escape_html(&view.server),
        database = escape_html(&view.database),
        username = escape_html(&view.username),
    );

    layout("Settings", true, &body)
}
