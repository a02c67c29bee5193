//! Diesel schema for task persistence.

diesel::table! {
    /// Per-user task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning user; references `users(id)`.
        owner_id -> Uuid,
        /// Trimmed task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Board status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority level.
        #[max_length = 10]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Completion timestamp, set while the task is done.
        completed_at -> Nullable<Timestamptz>,
    }
}
