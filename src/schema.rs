diesel::table! {
    bookings (id) {
        id -> Int4,
        slot_id -> Int4,
        name -> Text,
        email -> Text,
        topic -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    messages (id) {
        id -> Int4,
        name -> Text,
        email -> Text,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    slots (id) {
        id -> Int4,
        start_time -> Timestamptz,
        end_time -> Timestamptz,
        booked -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(bookings -> slots (slot_id));
diesel::allow_tables_to_appear_in_same_query!(bookings, slots);
