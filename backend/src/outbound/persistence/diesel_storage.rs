//! PostgreSQL-backed storage implementing all four store ports.
//!
//! Every operation is a single parameterised statement. Reads by id map
//! missing rows to `None`; updates ignore the affected-row count, so
//! updating an absent id silently succeeds; deletes are idempotent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CartStore, ContactStore, CourseStore, StorageError, UserStore};
use crate::domain::{
    CartLine, ContactMessage, Course, NewContactMessage, NewCourse, NewUser, User, UserProfile,
};

use super::models::{
    CartItemRow, ContactMessageRow, CourseRow, NewCartItemRow, NewContactMessageRow, NewCourseRow,
    NewUserRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{cart_items, contact_messages, courses, users};

/// Diesel-backed storage (Backend A).
#[derive(Clone)]
pub struct DieselStorage {
    pool: DbPool,
}

impl DieselStorage {
    /// Create storage over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connectivity check used by the storage adapter's probe.
    pub async fn ping(&self) -> Result<(), PoolError> {
        self.pool.ping().await
    }
}

fn map_pool_error(error: PoolError) -> StorageError {
    StorageError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> StorageError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageError::connection("database connection error")
        }
        other => StorageError::query(other.to_string()),
    }
}

#[async_trait]
impl UserStore for DieselStorage {
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                name: &user.name,
                email: &user.email,
                password: &user.password,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<UserProfile>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id))
            .set((users::name.eq(name), users::email.eq(email)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete_user(&self, id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[async_trait]
impl CourseStore for DieselStorage {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CourseRow = diesel::insert_into(courses::table)
            .values(&NewCourseRow {
                name: &course.name,
                price: course.price,
                image: &course.image,
            })
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn courses(&self) -> Result<Vec<Course>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .order(courses::id.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn course_by_id(&self, id: i32) -> Result<Option<Course>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id)
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update_course(&self, id: i32, course: &NewCourse) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(courses::table.find(id))
            .set((
                courses::name.eq(&course.name),
                courses::price.eq(course.price),
                courses::image.eq(&course.image),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete_course(&self, id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(courses::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[async_trait]
impl CartStore for DieselStorage {
    async fn add_to_cart(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Atomic upsert against the (user_id, course_id) unique constraint:
        // a concurrent duplicate add accumulates quantity in one row.
        diesel::insert_into(cart_items::table)
            .values(&NewCartItemRow {
                user_id,
                course_id,
                quantity,
            })
            .on_conflict((cart_items::user_id, cart_items::course_id))
            .do_update()
            .set(cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn cart_for_user(&self, user_id: i32) -> Result<Vec<CartLine>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CartItemRow, CourseRow)> = cart_items::table
            .inner_join(courses::table)
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::id.asc())
            .select((CartItemRow::as_select(), CourseRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(item, course)| CartLine {
                id: item.id,
                user_id: item.user_id,
                course_id: item.course_id,
                quantity: item.quantity,
                name: course.name,
                price: course.price,
                image: course.image,
            })
            .collect())
    }

    async fn set_quantity(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::course_id.eq(course_id)),
        )
        .set(cart_items::quantity.eq(quantity))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::course_id.eq(course_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn clear_cart(&self, user_id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[async_trait]
impl ContactStore for DieselStorage {
    async fn create_contact(
        &self,
        contact: &NewContactMessage,
    ) -> Result<ContactMessage, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ContactMessageRow = diesel::insert_into(contact_messages::table)
            .values(&NewContactMessageRow {
                name: &contact.name,
                email: &contact.email,
                message: &contact.message,
            })
            .returning(ContactMessageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn contacts(&self) -> Result<Vec<ContactMessage>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ContactMessageRow> = contact_messages::table
            .order(contact_messages::created_at.desc())
            .select(ContactMessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn contact_by_id(&self, id: i32) -> Result<Option<ContactMessage>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ContactMessageRow> = contact_messages::table
            .find(id)
            .select(ContactMessageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update_contact(
        &self,
        id: i32,
        contact: &NewContactMessage,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(contact_messages::table.find(id))
            .set((
                contact_messages::name.eq(&contact.name),
                contact_messages::email.eq(&contact.email),
                contact_messages::message.eq(&contact.message),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete_contact(&self, id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(contact_messages::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
