// Column names are the ones the `users` table was created with; the Rust
// identifiers are snake_case aliases.

diesel::table! {
    users (id) {
        id -> BigInt,
        #[sql_name = "StudentName"]
        student_name -> Text,
        #[sql_name = "Email"]
        email -> Text,
        #[sql_name = "Committee"]
        committee -> Text,
        #[sql_name = "PhoneNumber"]
        phone_number -> Nullable<Text>,
        #[sql_name = "IsAccepted"]
        is_accepted -> Nullable<Text>,
        #[sql_name = "CommuintyID"]
        commuinty_id -> Nullable<Text>,
        whatspplink -> Nullable<Text>,
    }
}
