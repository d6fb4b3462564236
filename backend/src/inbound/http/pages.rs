//! HTML page handlers: menu, accounts, cart, and the contact form.
//!
//! Pages are rendered as inline HTML strings. Form submissions follow the
//! post/redirect pattern; validation failures re-render the form with the
//! message inline. Anonymous visitors on guarded pages are redirected to
//! `/login?error=Please login first`.

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use tracing::error;

use crate::domain::{NewContactMessage, Registration};
use crate::inbound::http::session::{SessionContext, SessionUser, LOGIN_REQUIRED};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Escape text destined for an HTML body or attribute value.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap page content in the shared layout with the navigation bar.
fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> String {
    let account_nav = match user {
        Some(user) => format!(
            concat!(
                r#"<span>Hello, {}</span> "#,
                r#"<form method="post" action="/logout" style="display:inline">"#,
                r#"<button type="submit">Logout</button></form>"#
            ),
            escape(&user.name)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_owned(),
    };
    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\">",
            "<title>{title} - Restaurant</title></head><body>",
            "<nav><a href=\"/\">Home</a> <a href=\"/about\">About</a> ",
            "<a href=\"/contact\">Contact</a> <a href=\"/cart\">Cart</a> {account}</nav>",
            "<main>{body}</main></body></html>"
        ),
        title = escape(title),
        account = account_nav,
        body = body
    )
}

fn html(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn redirect_to_login() -> HttpResponse {
    redirect(&format!(
        "/login?error={}",
        LOGIN_REQUIRED.replace(' ', "%20")
    ))
}

fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

#[derive(Deserialize)]
pub struct HomeQuery {
    login: Option<String>,
}

/// Home page: the course list plus the storage-mode indicator.
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<HomeQuery>,
) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    let courses = match state.courses.courses().await {
        Ok(courses) => courses,
        Err(err) => {
            error!(error = %err, "failed to load courses for home page");
            return Ok(HttpResponse::InternalServerError()
                .body(format!("Error loading courses: {err}")));
        }
    };

    let banner = if query.login.as_deref() == Some("success") {
        r#"<p class="success">Login successful!</p>"#
    } else {
        ""
    };
    let storage = if state.storage.is_relational() {
        "PostgreSQL"
    } else {
        "File Storage"
    };
    let mut list = String::new();
    for course in &courses {
        list.push_str(&format!(
            concat!(
                r#"<li><img src="{image}" alt="{name}" width="80">"#,
                "<h3>{name}</h3><p>{price} kr</p>",
                r#"<form method="post" action="/cart/add/{id}">"#,
                r#"<button type="submit">Add to cart</button></form></li>"#
            ),
            image = escape(&course.image),
            name = escape(&course.name),
            price = course.price,
            id = course.id
        ));
    }
    let body = format!(
        "{banner}<h1>Our Menu</h1><p>Storage: {storage}</p><ul>{list}</ul>",
        banner = banner,
        storage = storage,
        list = list
    );
    Ok(html(layout("Home", user.as_ref(), &body)))
}

#[get("/about")]
pub async fn about(session: SessionContext) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    let body = concat!(
        "<h1>About Us</h1>",
        "<p>A small family restaurant serving honest food since 1998. ",
        "Order ahead online and pick your meal up at the counter.</p>"
    );
    Ok(html(layout("About", user.as_ref(), body)))
}

fn register_form(error: Option<&str>) -> String {
    format!(
        concat!(
            "{error}<h1>Register</h1>",
            r#"<form method="post" action="/register">"#,
            r#"<label>Name <input name="name"></label>"#,
            r#"<label>Email <input name="email" type="email"></label>"#,
            r#"<label>Password <input name="password" type="password"></label>"#,
            r#"<label>Confirm password <input name="confirmPassword" type="password"></label>"#,
            r#"<button type="submit">Register</button></form>"#
        ),
        error = error_banner(error)
    )
}

#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    Ok(html(layout("Register", user.as_ref(), &register_form(None))))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Handle registration. Success logs the new user in and redirects home;
/// validation failures re-render the form.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration = Registration {
        name: form.name,
        email: form.email,
        password: form.password,
        confirm_password: form.confirm_password,
    };
    match state.accounts.register(&registration).await {
        Ok(profile) => {
            session.persist_user(&profile)?;
            Ok(redirect("/?login=success"))
        }
        Err(err) => Ok(html(layout(
            "Register",
            None,
            &register_form(Some(&err.to_string())),
        ))),
    }
}

fn login_form(error: Option<&str>) -> String {
    format!(
        concat!(
            "{error}<h1>Login</h1>",
            r#"<form method="post" action="/login">"#,
            r#"<label>Email <input name="email" type="email"></label>"#,
            r#"<label>Password <input name="password" type="password"></label>"#,
            r#"<button type="submit">Login</button></form>"#
        ),
        error = error_banner(error)
    )
}

#[derive(Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
}

#[get("/login")]
pub async fn login_page(
    session: SessionContext,
    query: web::Query<LoginQuery>,
) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    Ok(html(layout(
        "Login",
        user.as_ref(),
        &login_form(query.error.as_deref()),
    )))
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    match state.accounts.login(&form.email, &form.password).await {
        Ok(profile) => {
            session.persist_user(&profile)?;
            Ok(redirect("/?login=success"))
        }
        Err(err) => Ok(html(layout(
            "Login",
            None,
            &login_form(Some(&err.to_string())),
        ))),
    }
}

#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    redirect("/")
}

fn contact_form(user: Option<&SessionUser>, success: bool, error: Option<&str>) -> String {
    let notice = if success {
        r#"<p class="success">Thank you! Your message has been sent.</p>"#
    } else {
        ""
    };
    format!(
        concat!(
            "{notice}{error}<h1>Contact Us</h1>",
            r#"<form method="post" action="/contact">"#,
            r#"<label>Name <input name="name" value="{name}"></label>"#,
            r#"<label>Email <input name="email" type="email"></label>"#,
            r#"<label>Message <textarea name="message"></textarea></label>"#,
            r#"<button type="submit">Send</button></form>"#
        ),
        notice = notice,
        error = error_banner(error),
        name = escape(user.map(|u| u.name.as_str()).unwrap_or(""))
    )
}

#[get("/contact")]
pub async fn contact_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    Ok(html(layout(
        "Contact",
        user.as_ref(),
        &contact_form(user.as_ref(), false, None),
    )))
}

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[post("/contact")]
pub async fn contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let user = session.current_user()?;
    let message = NewContactMessage {
        name: form.name.clone(),
        email: form.email.clone(),
        message: form.message.clone(),
    };
    let rendered = match state.contacts.create_contact(&message).await {
        Ok(_) => contact_form(user.as_ref(), true, None),
        Err(err) => {
            error!(error = %err, "failed to save contact message");
            contact_form(user.as_ref(), false, Some("Failed to send message"))
        }
    };
    Ok(html(layout("Contact", user.as_ref(), &rendered)))
}

/// Cart page. Requires a signed-in user.
#[get("/cart")]
pub async fn cart_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return Ok(redirect_to_login());
    };
    let lines = match state.carts.cart_for_user(user.id).await {
        Ok(lines) => lines,
        Err(err) => {
            error!(error = %err, "failed to load cart");
            return Ok(HttpResponse::InternalServerError().body("Error loading cart"));
        }
    };

    let total: i64 = lines
        .iter()
        .map(|line| i64::from(line.price) * i64::from(line.quantity))
        .sum();
    let mut rows = String::new();
    for line in &lines {
        rows.push_str(&format!(
            concat!(
                "<tr><td>{name}</td><td>{quantity}</td><td>{price} kr</td>",
                r#"<td><form method="post" action="/cart/remove/{id}">"#,
                r#"<button type="submit">Remove</button></form></td></tr>"#
            ),
            name = escape(&line.name),
            quantity = line.quantity,
            price = line.price,
            id = line.course_id
        ));
    }
    let body = format!(
        concat!(
            "<h1>Your Cart</h1>",
            "<table><tr><th>Course</th><th>Qty</th><th>Price</th><th></th></tr>{rows}</table>",
            "<p>Total: {total} kr</p>"
        ),
        rows = rows,
        total = total
    );
    Ok(html(layout("Cart", Some(&user), &body)))
}

/// Add one unit of a course to the signed-in user's cart.
///
/// A missing course silently redirects home, matching the menu flow
/// where the button always exists for a listed course.
#[post("/cart/add/{id}")]
pub async fn cart_add(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return Ok(redirect_to_login());
    };
    let course_id = path.into_inner();
    if state.courses.course_by_id(course_id).await?.is_none() {
        return Ok(redirect("/"));
    }
    if let Err(err) = state.carts.add_to_cart(user.id, course_id, 1).await {
        error!(error = %err, course_id, "failed to add course to cart");
    }
    Ok(redirect("/"))
}

#[post("/cart/remove/{id}")]
pub async fn cart_remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let Some(user) = session.current_user()? else {
        return Ok(redirect_to_login());
    };
    if let Err(err) = state.carts.remove_from_cart(user.id, path.into_inner()).await {
        error!(error = %err, "failed to remove course from cart");
    }
    Ok(redirect("/cart"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("<script>alert('x')</script>", "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;")]
    #[case(r#"a "quoted" & bracketed"#, "a &quot;quoted&quot; &amp; bracketed")]
    fn escapes_html_metacharacters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn layout_greets_the_signed_in_user() {
        let user = SessionUser {
            id: 1,
            name: "Bo & Co".to_owned(),
        };
        let markup = layout("Home", Some(&user), "<p>hi</p>");
        assert!(markup.contains("Hello, Bo &amp; Co"));
        assert!(markup.contains("/logout"));
    }

    #[test]
    fn layout_offers_login_links_to_anonymous_visitors() {
        let markup = layout("Home", None, "");
        assert!(markup.contains(r#"<a href="/login">Login</a>"#));
        assert!(!markup.contains("/logout"));
    }

    #[test]
    fn login_redirect_escapes_the_error_message() {
        let response = redirect_to_login();
        let location = response
            .headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("ascii location");
        assert_eq!(location, "/login?error=Please%20login%20first");
    }
}
