//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate with `diesel print-schema` or
//! update by hand.

diesel::table! {
    /// Registered accounts.
    ///
    /// Role-conditional columns and the PIN/verified pairing are guarded by
    /// CHECK constraints; `email` and `admin_id` carry unique constraints.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// Trimmed, lowercased address.
        email -> Varchar,
        password_hash -> Text,
        user_type -> Varchar,
        organization_type -> Nullable<Varchar>,
        registration_number -> Nullable<Text>,
        admin_id -> Nullable<Int8>,
        is_verified -> Bool,
        /// Present exactly while `is_verified` is false.
        verification_pin -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    food_donations (id) {
        id -> Uuid,
        donor_id -> Uuid,
        recipient_id -> Nullable<Uuid>,
        food_type -> Text,
        quantity -> Int4,
        expiration_date -> Timestamptz,
        location -> Text,
        pickup_time -> Text,
        contact_info -> Text,
        images -> Array<Text>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    food_purchases (id) {
        id -> Uuid,
        buyer_id -> Uuid,
        restaurant -> Text,
        food_type -> Text,
        quantity -> Int4,
        price -> Float8,
        discount -> Float8,
        total_price -> Float8,
        purchase_date -> Timestamptz,
    }
}

diesel::joinable!(food_donations -> users (donor_id));
diesel::joinable!(food_purchases -> users (buyer_id));

diesel::allow_tables_to_appear_in_same_query!(food_donations, food_purchases, users);
