//! File-based storage adapter (Backend B).
//!
//! Four JSON documents under a data directory, one per entity collection.
//! Every operation loads the whole document, mutates it in memory, and
//! rewrites it. A per-collection mutex serialises those read-modify-write
//! cycles, so concurrent mutations within this process cannot lose
//! updates; there is still no cross-process locking.

mod models;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::ports::{CartStore, ContactStore, CourseStore, StorageError, UserStore};
use crate::domain::{
    CartLine, ContactMessage, Course, NewContactMessage, NewCourse, NewUser, User, UserProfile,
};

use models::{seed_courses, CartItemRecord, ContactMessageRecord, CourseRecord, UserRecord};

const USERS_FILE: &str = "users.json";
const COURSES_FILE: &str = "courses.json";
const CART_FILE: &str = "cart.json";
const CONTACT_FILE: &str = "contact.json";

/// JSON-document storage rooted at a data directory.
pub struct FileStore {
    dir: PathBuf,
    users_lock: Mutex<()>,
    courses_lock: Mutex<()>,
    cart_lock: Mutex<()>,
    contacts_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store rooted at `dir`. Nothing touches the filesystem
    /// until the first operation.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            users_lock: Mutex::new(()),
            courses_lock: Mutex::new(()),
            cart_lock: Mutex::new(()),
            contacts_lock: Mutex::new(()),
        }
    }

    /// Load a collection, seeding the file on first touch.
    async fn load<T>(&self, file: &str, seed: fn() -> Vec<T>) -> Result<Vec<T>, StorageError>
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.dir.join(file);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| StorageError::query(format!("corrupt {file}: {err}"))),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let records = seed();
                self.store(&path, &records).await?;
                Ok(records)
            }
            Err(err) => Err(StorageError::query(format!("cannot read {file}: {err}"))),
        }
    }

    /// Rewrite a collection file wholesale.
    async fn store<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| StorageError::query(format!("cannot create data dir: {err}")))?;
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|err| StorageError::query(format!("cannot encode collection: {err}")))?;
        fs::write(path, bytes)
            .await
            .map_err(|err| StorageError::query(format!("cannot write collection: {err}")))
    }

    async fn save<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StorageError> {
        self.store(&self.dir.join(file), records).await
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

fn empty<T>() -> Vec<T> {
    Vec::new()
}

#[async_trait]
impl UserStore for FileStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StorageError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_FILE, empty).await?;
        let record = UserRecord {
            id: next_id(users.iter().map(|u| u.id)),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: Utc::now(),
        };
        users.push(record.clone());
        self.save(USERS_FILE, &users).await?;
        Ok(record.into())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let _guard = self.users_lock.lock().await;
        let users: Vec<UserRecord> = self.load(USERS_FILE, empty).await?;
        Ok(users.into_iter().find(|u| u.email == email).map(Into::into))
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<UserProfile>, StorageError> {
        let _guard = self.users_lock.lock().await;
        let users: Vec<UserRecord> = self.load(USERS_FILE, empty).await?;
        Ok(users
            .into_iter()
            .find(|u| u.id == id)
            .map(|u| User::from(u).profile()))
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StorageError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_FILE, empty).await?;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.name = name.to_owned();
            user.email = email.to_owned();
        }
        self.save(USERS_FILE, &users).await
    }

    async fn delete_user(&self, id: i32) -> Result<(), StorageError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_FILE, empty).await?;
        users.retain(|u| u.id != id);
        self.save(USERS_FILE, &users).await
    }
}

#[async_trait]
impl CourseStore for FileStore {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        let _guard = self.courses_lock.lock().await;
        let mut courses: Vec<CourseRecord> = self.load(COURSES_FILE, seed_courses).await?;
        let record = CourseRecord {
            id: next_id(courses.iter().map(|c| c.id)),
            name: course.name.clone(),
            price: course.price,
            image: course.image.clone(),
        };
        courses.push(record.clone());
        self.save(COURSES_FILE, &courses).await?;
        Ok(record.into())
    }

    async fn courses(&self) -> Result<Vec<Course>, StorageError> {
        let _guard = self.courses_lock.lock().await;
        let mut courses: Vec<CourseRecord> = self.load(COURSES_FILE, seed_courses).await?;
        courses.sort_by_key(|c| c.id);
        Ok(courses.into_iter().map(Into::into).collect())
    }

    async fn course_by_id(&self, id: i32) -> Result<Option<Course>, StorageError> {
        let _guard = self.courses_lock.lock().await;
        let courses: Vec<CourseRecord> = self.load(COURSES_FILE, seed_courses).await?;
        Ok(courses.into_iter().find(|c| c.id == id).map(Into::into))
    }

    async fn update_course(&self, id: i32, course: &NewCourse) -> Result<(), StorageError> {
        let _guard = self.courses_lock.lock().await;
        let mut courses: Vec<CourseRecord> = self.load(COURSES_FILE, seed_courses).await?;
        if let Some(record) = courses.iter_mut().find(|c| c.id == id) {
            record.name = course.name.clone();
            record.price = course.price;
            record.image = course.image.clone();
        }
        self.save(COURSES_FILE, &courses).await
    }

    async fn delete_course(&self, id: i32) -> Result<(), StorageError> {
        let _guard = self.courses_lock.lock().await;
        let mut courses: Vec<CourseRecord> = self.load(COURSES_FILE, seed_courses).await?;
        courses.retain(|c| c.id != id);
        self.save(COURSES_FILE, &courses).await
    }
}

#[async_trait]
impl CartStore for FileStore {
    async fn add_to_cart(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        let _guard = self.cart_lock.lock().await;
        let mut items: Vec<CartItemRecord> = self.load(CART_FILE, empty).await?;
        if let Some(existing) = items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.course_id == course_id)
        {
            existing.quantity += quantity;
        } else {
            items.push(CartItemRecord {
                id: next_id(items.iter().map(|i| i.id)),
                user_id,
                course_id,
                quantity,
                created_at: Utc::now(),
            });
        }
        self.save(CART_FILE, &items).await
    }

    async fn cart_for_user(&self, user_id: i32) -> Result<Vec<CartLine>, StorageError> {
        let items: Vec<CartItemRecord> = {
            let _guard = self.cart_lock.lock().await;
            self.load(CART_FILE, empty).await?
        };
        let courses = self.courses().await?;

        let mut lines: Vec<CartLine> = items
            .into_iter()
            .filter(|i| i.user_id == user_id)
            .map(|record| {
                let item = crate::domain::CartItem::from(record);
                // Keep the line even when the course vanished; the
                // placeholder never fails the whole fetch.
                courses
                    .iter()
                    .find(|c| c.id == item.course_id)
                    .map_or_else(
                        || CartLine::orphaned(&item),
                        |course| CartLine {
                            id: item.id,
                            user_id: item.user_id,
                            course_id: item.course_id,
                            quantity: item.quantity,
                            name: course.name.clone(),
                            price: course.price,
                            image: course.image.clone(),
                        },
                    )
            })
            .collect();
        lines.sort_by_key(|l| l.id);
        Ok(lines)
    }

    async fn set_quantity(
        &self,
        user_id: i32,
        course_id: i32,
        quantity: i32,
    ) -> Result<(), StorageError> {
        let _guard = self.cart_lock.lock().await;
        let mut items: Vec<CartItemRecord> = self.load(CART_FILE, empty).await?;
        if let Some(item) = items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.course_id == course_id)
        {
            item.quantity = quantity;
        }
        self.save(CART_FILE, &items).await
    }

    async fn remove_from_cart(&self, user_id: i32, course_id: i32) -> Result<(), StorageError> {
        let _guard = self.cart_lock.lock().await;
        let mut items: Vec<CartItemRecord> = self.load(CART_FILE, empty).await?;
        items.retain(|i| !(i.user_id == user_id && i.course_id == course_id));
        self.save(CART_FILE, &items).await
    }

    async fn clear_cart(&self, user_id: i32) -> Result<(), StorageError> {
        let _guard = self.cart_lock.lock().await;
        let mut items: Vec<CartItemRecord> = self.load(CART_FILE, empty).await?;
        items.retain(|i| i.user_id != user_id);
        self.save(CART_FILE, &items).await
    }
}

#[async_trait]
impl ContactStore for FileStore {
    async fn create_contact(
        &self,
        contact: &NewContactMessage,
    ) -> Result<ContactMessage, StorageError> {
        let _guard = self.contacts_lock.lock().await;
        let mut contacts: Vec<ContactMessageRecord> = self.load(CONTACT_FILE, empty).await?;
        let record = ContactMessageRecord {
            id: next_id(contacts.iter().map(|c| c.id)),
            name: contact.name.clone(),
            email: contact.email.clone(),
            message: contact.message.clone(),
            created_at: Utc::now(),
        };
        contacts.push(record.clone());
        self.save(CONTACT_FILE, &contacts).await?;
        Ok(record.into())
    }

    async fn contacts(&self) -> Result<Vec<ContactMessage>, StorageError> {
        let _guard = self.contacts_lock.lock().await;
        let mut contacts: Vec<ContactMessageRecord> = self.load(CONTACT_FILE, empty).await?;
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(contacts.into_iter().map(Into::into).collect())
    }

    async fn contact_by_id(&self, id: i32) -> Result<Option<ContactMessage>, StorageError> {
        let _guard = self.contacts_lock.lock().await;
        let contacts: Vec<ContactMessageRecord> = self.load(CONTACT_FILE, empty).await?;
        Ok(contacts.into_iter().find(|c| c.id == id).map(Into::into))
    }

    async fn update_contact(
        &self,
        id: i32,
        contact: &NewContactMessage,
    ) -> Result<(), StorageError> {
        let _guard = self.contacts_lock.lock().await;
        let mut contacts: Vec<ContactMessageRecord> = self.load(CONTACT_FILE, empty).await?;
        if let Some(record) = contacts.iter_mut().find(|c| c.id == id) {
            record.name = contact.name.clone();
            record.email = contact.email.clone();
            record.message = contact.message.clone();
        }
        self.save(CONTACT_FILE, &contacts).await
    }

    async fn delete_contact(&self, id: i32) -> Result<(), StorageError> {
        let _guard = self.contacts_lock.lock().await;
        let mut contacts: Vec<ContactMessageRecord> = self.load(CONTACT_FILE, empty).await?;
        contacts.retain(|c| c.id != id);
        self.save(CONTACT_FILE, &contacts).await
    }
}
