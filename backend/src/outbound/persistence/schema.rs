//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! can regenerate them from a live database.

diesel::table! {
    /// Registered users. `password` holds the argon2 PHC string.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Menu catalogue.
    courses (id) {
        id -> Int4,
        name -> Varchar,
        price -> Int4,
        image -> Varchar,
    }
}

diesel::table! {
    /// Cart rows; unique on (user_id, course_id).
    cart_items (id) {
        id -> Int4,
        user_id -> Int4,
        course_id -> Int4,
        quantity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact form submissions.
    contact_messages (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(cart_items -> courses (course_id));
diesel::joinable!(cart_items -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(cart_items, courses, users);
