diesel::table! {
    leads (id) {
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        phone -> Text,
        phone_country -> Nullable<Text>,
        airline -> Text,
        miles_amount -> Int8,
        message -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    bookings (id) {
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        phone -> Text,
        phone_country -> Nullable<Text>,
        from_airport_code -> Text,
        to_airport_code -> Text,
        departure_date -> Date,
        airline -> Text,
        points_required -> Int8,
        flight_details -> Text,
        screenshot_url -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    notification_settings (id) {
        id -> Int4,
        enabled -> Bool,
        admin_emails -> Array<Text>,
        updated_at -> Timestamptz,
    }
}
