//! Diesel table definitions. Keep in sync with `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 254]
        email -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}
