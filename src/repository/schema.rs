// The text column shares its name with the table, so it is renamed on the Rust side.

diesel::table! {
    todo (id) {
        id -> Int4,
        #[sql_name = "todo"]
        body -> Nullable<Text>,
    }
}
