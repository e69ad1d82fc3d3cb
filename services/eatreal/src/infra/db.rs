use std::collections::{HashMap, HashSet};

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionTrait,
    sea_query::{Expr, LikeExpr, OnConflict},
};

use eatreal_domain::geo::BoundingBox;
use eatreal_schema::{friends, images, restaurants, users, visit_companions, visits};

use crate::domain::repository::{RestaurantRepository, UserRepository, VisitRepository};
use crate::domain::types::{
    Image, NewImage, NewRestaurant, NewUser, NewVisit, Restaurant, Review, ReviewFilter, User,
    UserSummary, VisitChanges,
};
use crate::error::EatRealError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn new_user_model(user: &NewUser) -> users::ActiveModel {
    let now = Utc::now();
    users::ActiveModel {
        email: Set(user.email.clone()),
        password: Set(user.password_hash.clone()),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        admin: Set(user.admin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, EatRealError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, EatRealError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, EatRealError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, EatRealError> {
        match new_user_model(user).insert(&self.db).await {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(EatRealError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn create_if_absent(&self, user: &NewUser) -> Result<User, EatRealError> {
        users::Entity::insert(new_user_model(user))
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert user if absent")?;
        self.find_by_email(&user.email)
            .await?
            .ok_or_else(|| anyhow!("user missing after insert-if-absent").into())
    }

    async fn list_all(&self) -> Result<Vec<User>, EatRealError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list_friends(&self, user_id: i32) -> Result<Vec<User>, EatRealError> {
        let links = friends::Entity::find()
            .filter(
                Condition::any()
                    .add(friends::Column::UserId.eq(user_id))
                    .add(friends::Column::FriendId.eq(user_id)),
            )
            .all(&self.db)
            .await
            .context("list friendships")?;
        let ids: Vec<i32> = links
            .into_iter()
            .map(|link| {
                if link.user_id == user_id {
                    link.friend_id
                } else {
                    link.user_id
                }
            })
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        self.find_by_ids(&ids).await
    }

    async fn list_except(&self, user_id: i32) -> Result<Vec<User>, EatRealError> {
        let models = users::Entity::find()
            .filter(users::Column::Id.ne(user_id))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list other users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password,
        first_name: model.first_name,
        last_name: model.last_name,
        admin: model.admin,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn summary_from_model(model: &users::Model) -> UserSummary {
    UserSummary {
        id: model.id,
        email: model.email.clone(),
        first_name: model.first_name.clone(),
        last_name: model.last_name.clone(),
    }
}

// ── Restaurant repository ────────────────────────────────────────────────────

/// `%query%` with the LIKE wildcards in `query` escaped by `\`.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Name or address contains `query` literally.
fn name_or_address_contains(query: &str) -> Condition {
    let pattern = contains_pattern(query);
    Condition::any()
        .add(
            Expr::col((restaurants::Entity, restaurants::Column::Name))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
        .add(
            Expr::col((restaurants::Entity, restaurants::Column::Address))
                .like(LikeExpr::new(pattern).escape('\\')),
        )
}

#[derive(Clone)]
pub struct DbRestaurantRepository {
    pub db: DatabaseConnection,
}

impl RestaurantRepository for DbRestaurantRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, EatRealError> {
        let model = restaurants::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find restaurant by id")?;
        Ok(model.map(restaurant_from_model))
    }

    async fn find_matching(
        &self,
        query: &str,
        window: BoundingBox,
    ) -> Result<Vec<Restaurant>, EatRealError> {
        let models = restaurants::Entity::find()
            .filter(name_or_address_contains(query))
            .filter(restaurants::Column::Latitude.between(window.min_latitude, window.max_latitude))
            .filter(
                restaurants::Column::Longitude.between(window.min_longitude, window.max_longitude),
            )
            .order_by_asc(restaurants::Column::Id)
            .all(&self.db)
            .await
            .context("find matching restaurants")?;
        Ok(models.into_iter().map(restaurant_from_model).collect())
    }

    async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, EatRealError> {
        let model = restaurants::ActiveModel {
            name: Set(restaurant.name.clone()),
            latitude: Set(restaurant.coordinates.latitude),
            longitude: Set(restaurant.coordinates.longitude),
            address: Set(restaurant.address.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create restaurant")?;
        Ok(restaurant_from_model(model))
    }
}

fn restaurant_from_model(model: restaurants::Model) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        latitude: model.latitude,
        longitude: model.longitude,
        address: model.address,
    }
}

// ── Visit repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVisitRepository {
    pub db: DatabaseConnection,
}

impl VisitRepository for DbVisitRepository {
    async fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, EatRealError> {
        let mut query = visits::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(visits::Column::UserId.eq(user_id));
        }
        if let Some(ref ids) = filter.restaurant_ids {
            query = query.filter(visits::Column::RestaurantId.is_in(ids.iter().copied()));
        }
        query = query
            .order_by_desc(visits::Column::VisitedAt)
            .order_by_desc(visits::Column::Id);
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        let models = query.all(&self.db).await.context("list visits")?;
        let reviews = load_reviews(&self.db, models)
            .await
            .context("load review details")?;
        Ok(reviews)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, EatRealError> {
        let Some(model) = visits::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find visit by id")?
        else {
            return Ok(None);
        };
        let mut reviews = load_reviews(&self.db, vec![model])
            .await
            .context("load review details")?;
        Ok(reviews.pop())
    }

    async fn create(&self, visit: &NewVisit) -> Result<i32, EatRealError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let visit = visit.clone();
                Box::pin(async move {
                    let now = Utc::now();
                    let model = visits::ActiveModel {
                        user_id: Set(visit.user_id),
                        restaurant_id: Set(visit.restaurant_id),
                        rating: Set(visit.rating.get() as i16),
                        review: Set(visit.review),
                        price: Set(visit.price.map(|p| p.as_str().to_owned())),
                        visited_at: Set(visit.visited_at),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_companions(txn, model.id, &visit.companion_ids).await?;
                    insert_images(txn, model.id, &visit.images).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create visit")?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &VisitChanges) -> Result<(), EatRealError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let mut am = visits::ActiveModel {
                        id: Set(id),
                        ..Default::default()
                    };
                    am.rating = Set(changes.rating.get() as i16);
                    am.review = Set(changes.review);
                    am.price = Set(changes.price.map(|p| p.as_str().to_owned()));
                    if let Some(visited_at) = changes.visited_at {
                        am.visited_at = Set(visited_at);
                    }
                    am.updated_at = Set(Utc::now());
                    am.update(txn).await?;

                    if let Some(companion_ids) = changes.companion_ids {
                        visit_companions::Entity::delete_many()
                            .filter(visit_companions::Column::VisitId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_companions(txn, id, &companion_ids).await?;
                    }
                    if let Some(new_images) = changes.images {
                        images::Entity::delete_many()
                            .filter(images::Column::VisitId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_images(txn, id, &new_images).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update visit")?;
        Ok(())
    }

    async fn add_image(&self, visit_id: i32, image: &NewImage) -> Result<Image, EatRealError> {
        let model = images::ActiveModel {
            url: Set(image.url.clone()),
            caption: Set(image.caption.clone()),
            visit_id: Set(visit_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("add image")?;
        Ok(image_from_model(model))
    }

    async fn delete_with_images(&self, id: i32) -> Result<bool, EatRealError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    images::Entity::delete_many()
                        .filter(images::Column::VisitId.eq(id))
                        .exec(txn)
                        .await?;
                    visit_companions::Entity::delete_many()
                        .filter(visit_companions::Column::VisitId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = visits::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete visit with images")?;
        Ok(deleted)
    }
}

async fn insert_companions(
    txn: &DatabaseTransaction,
    visit_id: i32,
    user_ids: &[i32],
) -> Result<(), DbErr> {
    if user_ids.is_empty() {
        return Ok(());
    }
    visit_companions::Entity::insert_many(user_ids.iter().map(|&user_id| {
        visit_companions::ActiveModel {
            visit_id: Set(visit_id),
            user_id: Set(user_id),
        }
    }))
    .exec_without_returning(txn)
    .await?;
    Ok(())
}

async fn insert_images(
    txn: &DatabaseTransaction,
    visit_id: i32,
    new_images: &[NewImage],
) -> Result<(), DbErr> {
    if new_images.is_empty() {
        return Ok(());
    }
    images::Entity::insert_many(new_images.iter().map(|image| images::ActiveModel {
        url: Set(image.url.clone()),
        caption: Set(image.caption.clone()),
        visit_id: Set(visit_id),
        ..Default::default()
    }))
    .exec_without_returning(txn)
    .await?;
    Ok(())
}

fn image_from_model(model: images::Model) -> Image {
    Image {
        id: model.id,
        url: model.url,
        caption: model.caption,
    }
}

/// Attach authors, restaurants, images and companions to visit rows,
/// preserving the row order.
async fn load_reviews<C: ConnectionTrait>(
    db: &C,
    models: Vec<visits::Model>,
) -> Result<Vec<Review>, DbErr> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let visit_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let restaurant_ids: HashSet<i32> = models.iter().map(|m| m.restaurant_id).collect();

    let companion_links = visit_companions::Entity::find()
        .filter(visit_companions::Column::VisitId.is_in(visit_ids.clone()))
        .order_by_asc(visit_companions::Column::UserId)
        .all(db)
        .await?;

    let user_ids: HashSet<i32> = models
        .iter()
        .map(|m| m.user_id)
        .chain(companion_links.iter().map(|link| link.user_id))
        .collect();
    let users_by_id: HashMap<i32, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let restaurants_by_id: HashMap<i32, restaurants::Model> = restaurants::Entity::find()
        .filter(restaurants::Column::Id.is_in(restaurant_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    let mut images_by_visit: HashMap<i32, Vec<Image>> = HashMap::new();
    for image in images::Entity::find()
        .filter(images::Column::VisitId.is_in(visit_ids))
        .order_by_asc(images::Column::Id)
        .all(db)
        .await?
    {
        images_by_visit
            .entry(image.visit_id)
            .or_default()
            .push(image_from_model(image));
    }

    let mut companions_by_visit: HashMap<i32, Vec<UserSummary>> = HashMap::new();
    for link in companion_links {
        if let Some(user) = users_by_id.get(&link.user_id) {
            companions_by_visit
                .entry(link.visit_id)
                .or_default()
                .push(summary_from_model(user));
        }
    }

    models
        .into_iter()
        .map(|model| {
            let author = users_by_id.get(&model.user_id).ok_or_else(|| {
                DbErr::RecordNotFound(format!("author {} of visit {}", model.user_id, model.id))
            })?;
            let restaurant = restaurants_by_id.get(&model.restaurant_id).ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "restaurant {} of visit {}",
                    model.restaurant_id, model.id
                ))
            })?;
            Ok(Review {
                id: model.id,
                user: summary_from_model(author),
                restaurant: restaurant_from_model(restaurant.clone()),
                rating: model.rating as i32,
                review: model.review,
                price: model.price.as_deref().and_then(|p| p.parse().ok()),
                visited_at: model.visited_at,
                created_at: model.created_at,
                updated_at: model.updated_at,
                images: images_by_visit.remove(&model.id).unwrap_or_default(),
                companions: companions_by_visit.remove(&model.id).unwrap_or_default(),
            })
        })
        .collect()
}
