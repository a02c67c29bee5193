//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Normalised login email, unique.
        #[max_length = 254]
        email -> Varchar,
        /// First name.
        #[max_length = 150]
        first_name -> Varchar,
        /// Last name.
        #[max_length = 150]
        last_name -> Varchar,
        /// Password hash in PHC format.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Registration timestamp.
        date_joined -> Timestamptz,
        /// Last profile change.
        updated_at -> Timestamptz,
    }
}
