//! HTML page shells.
//!
//! The service is API-first; these routes serve the minimal pages the
//! original deployment had: the public feedback form a QR code lands on,
//! and the admin/staff dashboard shells whose JavaScript drives the JSON
//! endpoints with a bearer token kept in local storage.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use bildir_core::catalog::Issue;
use bildir_db::models::location::Location;
use bildir_db::repositories::LocationRepo;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for `GET /feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackPageParams {
    pub loc: Option<String>,
}

/// GET /
///
/// Convenience redirect to the admin panel.
pub async fn index() -> Redirect {
    Redirect::to("/admin")
}

/// GET /feedback?loc=CODE
///
/// The public checklist form a location's QR code points at.
pub async fn feedback_page(
    State(state): State<AppState>,
    Query(params): Query<FeedbackPageParams>,
) -> Response {
    let Some(code) = params.loc.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Eksik parametre. (loc gerekli)").into_response();
    };

    let location = match LocationRepo::find_by_code(&state.pool, &code).await {
        Ok(Some(location)) => location,
        Ok(None) => return (StatusCode::NOT_FOUND, "Konum bulunamadı.").into_response(),
        Err(err) => return AppError::Database(err).into_response(),
    };

    let checklist = state.catalog.checklist(&location.category);
    Html(render_feedback_page(&location, checklist)).into_response()
}

/// GET /admin -- admin shell (login form + panel).
pub async fn admin_page() -> Html<&'static str> {
    Html(ADMIN_SHELL)
}

/// GET /staff/login -- staff login page.
pub async fn staff_login_page() -> Html<&'static str> {
    Html(STAFF_LOGIN_PAGE)
}

/// GET /staff -- staff dashboard shell.
pub async fn staff_page() -> Html<&'static str> {
    Html(STAFF_SHELL)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Escape text for interpolation into HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_feedback_page(location: &Location, checklist: &[Issue]) -> String {
    let mut options = String::new();
    for issue in checklist {
        options.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"issues\" value=\"{}\"> {}</label>\n",
            escape_html(&issue.id),
            escape_html(&issue.label)
        ));
    }

    FEEDBACK_PAGE
        .replace("__NAME__", &escape_html(&location.name))
        .replace("__CODE__", &escape_html(&location.code))
        .replace("__OPTIONS__", &options)
}

const FEEDBACK_PAGE: &str = r#"<!doctype html>
<html lang="tr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Bildirim - __NAME__</title>
<style>
body { font-family: sans-serif; max-width: 28rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin: .5rem 0; }
textarea { width: 100%; min-height: 4rem; }
button { margin-top: 1rem; padding: .5rem 1.5rem; }
#done { color: green; display: none; }
#fail { color: red; display: none; }
</style>
</head>
<body>
<h1>__NAME__</h1>
<p>Sorunları işaretleyin veya not bırakın.</p>
<form id="f">
__OPTIONS__
<textarea name="note" placeholder="Ek not (isteğe bağlı)"></textarea>
<button type="submit">Gönder</button>
</form>
<p id="done">Bildiriminiz alındı, teşekkürler.</p>
<p id="fail">Gönderilemedi, lütfen tekrar deneyin.</p>
<script>
document.getElementById('f').addEventListener('submit', function (e) {
  e.preventDefault();
  var issues = [];
  document.querySelectorAll('input[name=issues]:checked').forEach(function (c) { issues.push(c.value); });
  var note = document.querySelector('textarea[name=note]').value;
  fetch('/api/feedback', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ location_code: '__CODE__', issues: issues, note: note })
  }).then(function (r) {
    document.getElementById(r.ok ? 'done' : 'fail').style.display = 'block';
    if (r.ok) document.getElementById('f').style.display = 'none';
  }).catch(function () {
    document.getElementById('fail').style.display = 'block';
  });
});
</script>
</body>
</html>
"#;

const ADMIN_SHELL: &str = r#"<!doctype html>
<html lang="tr">
<head>
<meta charset="utf-8">
<title>Yönetim Paneli</title>
<style>
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
table { border-collapse: collapse; width: 100%; }
td, th { border: 1px solid #ccc; padding: .4rem .6rem; text-align: left; }
#panel { display: none; }
.error { color: red; }
</style>
</head>
<body>
<div id="login">
  <h1>Yönetici Girişi</h1>
  <form id="loginForm">
    <input name="username" placeholder="Kullanıcı adı" required>
    <input name="password" type="password" placeholder="Şifre" required>
    <button type="submit">Giriş</button>
    <span id="loginError" class="error"></span>
  </form>
</div>
<div id="panel">
  <h1>Çözülmemiş Bildirimler</h1>
  <button id="logout">Çıkış</button>
  <table>
    <thead><tr><th>Lokasyon</th><th>Durum</th><th>Zaman</th><th></th></tr></thead>
    <tbody id="rows"></tbody>
  </table>
</div>
<script>
var TOKEN_KEY = 'bildir_admin_token';

function authed(path, opts) {
  opts = opts || {};
  opts.headers = Object.assign({}, opts.headers, {
    'Authorization': 'Bearer ' + localStorage.getItem(TOKEN_KEY)
  });
  return fetch(path, opts);
}

function showPanel() {
  document.getElementById('login').style.display = 'none';
  document.getElementById('panel').style.display = 'block';
  refresh();
}

function refresh() {
  authed('/api/unresolved').then(function (r) {
    if (r.status === 401) { localStorage.removeItem(TOKEN_KEY); location.reload(); return; }
    r.json().then(function (body) {
      var rows = document.getElementById('rows');
      rows.innerHTML = '';
      body.data.forEach(function (item) {
        var tr = document.createElement('tr');
        [item.name + ' (' + item.code + ')', item.status, item.reported_at].forEach(function (text) {
          var td = document.createElement('td');
          td.textContent = text;
          tr.appendChild(td);
        });
        var td = document.createElement('td');
        var btn = document.createElement('button');
        btn.textContent = 'Çözüldü';
        btn.addEventListener('click', function () {
          authed('/admin/resolve', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ feedback_id: item.id })
          }).then(refresh);
        });
        td.appendChild(btn);
        tr.appendChild(td);
        rows.appendChild(tr);
      });
    });
  });
}

document.getElementById('loginForm').addEventListener('submit', function (e) {
  e.preventDefault();
  fetch('/admin/login', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      username: e.target.username.value,
      password: e.target.password.value
    })
  }).then(function (r) {
    if (!r.ok) { document.getElementById('loginError').textContent = 'Kullanıcı/şifre hatalı'; return; }
    r.json().then(function (body) {
      localStorage.setItem(TOKEN_KEY, body.token);
      showPanel();
    });
  });
});

document.getElementById('logout').addEventListener('click', function () {
  authed('/admin/logout', { method: 'POST' }).then(function () {
    localStorage.removeItem(TOKEN_KEY);
    location.reload();
  });
});

if (localStorage.getItem(TOKEN_KEY)) showPanel();
setInterval(function () {
  if (document.getElementById('panel').style.display === 'block') refresh();
}, 15000);
</script>
</body>
</html>
"#;

const STAFF_LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="tr">
<head>
<meta charset="utf-8">
<title>Personel Girişi</title>
<style>body { font-family: sans-serif; max-width: 28rem; margin: 2rem auto; } .error { color: red; }</style>
</head>
<body>
<h1>Personel Girişi</h1>
<form id="loginForm">
  <input name="username" placeholder="Kullanıcı adı" required>
  <input name="password" type="password" placeholder="Şifre" required>
  <button type="submit">Giriş</button>
  <span id="loginError" class="error"></span>
</form>
<script>
document.getElementById('loginForm').addEventListener('submit', function (e) {
  e.preventDefault();
  fetch('/staff/login', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      username: e.target.username.value,
      password: e.target.password.value
    })
  }).then(function (r) {
    if (!r.ok) { document.getElementById('loginError').textContent = 'Kullanıcı/şifre hatalı'; return; }
    r.json().then(function (body) {
      localStorage.setItem('bildir_staff_token', body.token);
      location.href = '/staff';
    });
  });
});
</script>
</body>
</html>
"#;

const STAFF_SHELL: &str = r#"<!doctype html>
<html lang="tr">
<head>
<meta charset="utf-8">
<title>Personel Paneli</title>
<style>
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
table { border-collapse: collapse; width: 100%; }
td, th { border: 1px solid #ccc; padding: .4rem .6rem; text-align: left; }
</style>
</head>
<body>
<h1>Katlarımdaki Bildirimler</h1>
<button id="logout">Çıkış</button>
<table>
  <thead><tr><th>Lokasyon</th><th>Kat</th><th>Durum</th><th>Zaman</th><th></th></tr></thead>
  <tbody id="rows"></tbody>
</table>
<script>
var TOKEN_KEY = 'bildir_staff_token';
if (!localStorage.getItem(TOKEN_KEY)) location.href = '/staff/login';

function authed(path, opts) {
  opts = opts || {};
  opts.headers = Object.assign({}, opts.headers, {
    'Authorization': 'Bearer ' + localStorage.getItem(TOKEN_KEY)
  });
  return fetch(path, opts);
}

function refresh() {
  authed('/staff/api/unresolved').then(function (r) {
    if (r.status === 401) { localStorage.removeItem(TOKEN_KEY); location.href = '/staff/login'; return; }
    r.json().then(function (body) {
      var rows = document.getElementById('rows');
      rows.innerHTML = '';
      body.data.forEach(function (item) {
        var tr = document.createElement('tr');
        [item.name + ' (' + item.code + ')', item.floor, item.status, item.reported_at].forEach(function (text) {
          var td = document.createElement('td');
          td.textContent = text === null ? '-' : text;
          tr.appendChild(td);
        });
        var td = document.createElement('td');
        var btn = document.createElement('button');
        btn.textContent = 'Çözüldü';
        btn.addEventListener('click', function () {
          authed('/admin/resolve', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ feedback_id: item.id })
          }).then(refresh);
        });
        td.appendChild(btn);
        tr.appendChild(td);
        rows.appendChild(tr);
      });
    });
  });
}

document.getElementById('logout').addEventListener('click', function () {
  authed('/staff/logout', { method: 'POST' }).then(function () {
    localStorage.removeItem(TOKEN_KEY);
    location.href = '/staff/login';
  });
});

refresh();
setInterval(refresh, 15000);
</script>
</body>
</html>
"#;
