//! Integration tests for the schedule grid endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    assert_error_envelope, bearer, body_json, build_test_app, db_now, get, last_scheduled,
    latest_revision_comment, seed_block, seed_convention, seed_game, seed_location, seed_slot,
    send_json, send_raw,
};
use conplan_core::roles::{ROLE_ATTENDEE, ROLE_STAFF};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Read endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn read_endpoint_serializes_grid_payload(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let main_hall = seed_location(&pool, con, "Main Hall").await;
    let room = seed_location(&pool, con, "Room 101").await;
    let friday = seed_block(&pool, "Friday Night", 1).await;
    let sat_midnight = seed_block(&pool, "Saturday Midnight", 2).await;
    // Ordered by start: the 18.5 slot serializes first.
    let evening = seed_slot(&pool, 19.0, 23.0).await;
    let long_evening = seed_slot(&pool, 18.5, 23.75).await;

    let scheduled = seed_game(&pool, con, 1, "Scheduled Game").await;
    let unscheduled = seed_game(&pool, con, 1, "Unscheduled Game").await;
    sqlx::query("UPDATE games SET location_id = $1, time_block_id = $2, time_slot_id = $3 WHERE id = $4")
        .bind(room)
        .bind(friday)
        .bind(evening)
        .bind(scheduled)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(build_test_app(pool), "/api/v1/schedule").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    // Locations in persistence order.
    assert_eq!(json["locations"][0]["id"], main_hall);
    assert_eq!(json["locations"][0]["text"], "Main Hall");
    assert_eq!(json["locations"][1]["id"], room);

    // Blocks by sort_id with computed offsets.
    assert_eq!(json["blocks"][0]["text"], "Friday Night");
    assert_eq!(json["blocks"][0]["offset"], -18);
    assert_eq!(json["blocks"][1]["id"], sat_midnight);
    assert_eq!(json["blocks"][1]["offset"], 30);

    // Slots by start with labels and widths.
    assert_eq!(json["slots"][0]["id"], long_evening);
    assert_eq!(json["slots"][0]["start"], 18.5);
    assert_eq!(json["slots"][0]["width"], 5.25);
    assert_eq!(json["slots"][0]["text"], "6 PM - 11 PM");
    assert_eq!(json["slots"][1]["id"], evening);
    assert_eq!(json["slots"][1]["width"], 4.0);
    assert_eq!(json["slots"][1]["text"], "7 PM - 11 PM");

    // Scheduled game: index refs into the arrays above, grid coords.
    let game = &json["games"][0];
    assert_eq!(game["title"], "Scheduled Game");
    assert_eq!(game["location"], 1);
    assert_eq!(game["time_block"], 0);
    assert_eq!(game["time_slot"], 1);
    assert_eq!(game["start"], 1.0); // -18 + 19
    assert_eq!(game["width"], 4.0);

    // Unscheduled game: sentinel values.
    let game = &json["games"][1];
    assert_eq!(game["id"], unscheduled);
    assert_eq!(game["location"], -1);
    assert_eq!(game["time_block"], -1);
    assert_eq!(game["time_slot"], -1);
    assert_eq!(game["start"], 100.0);
    assert_eq!(game["width"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn read_endpoint_needs_no_authentication(pool: PgPool) {
    seed_convention(&pool).await;
    let response = get(build_test_app(pool), "/api/v1/schedule").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Write endpoint: access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_write_is_unauthorized(pool: PgPool) {
    seed_convention(&pool).await;
    let response = send_json(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        None,
        &json!({"id": 1}),
    )
    .await;

    let envelope = assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(envelope["content"], "Missing Authorization header");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_staff_write_is_forbidden(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let game = seed_game(&pool, con, 1, "A Game").await;

    let response = send_json(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(1, ROLE_ATTENDEE)),
        &json!({"id": game}),
    )
    .await;

    let envelope = assert_error_envelope(response, StatusCode::FORBIDDEN).await;
    assert_eq!(envelope["content"], "Only staff have access to this function");
}

// ---------------------------------------------------------------------------
// Write endpoint: scheduling semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_schedule_assignment_end_to_end(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let location = seed_location(&pool, con, "Main Hall").await;
    let block = seed_block(&pool, "Friday Night", 1).await;
    let slot = seed_slot(&pool, 19.0, 23.0).await;
    let game = seed_game(&pool, con, 1, "A Game").await;

    let pre = db_now(&pool).await;

    let response = send_json(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        &json!({"id": game, "location": location, "time_block": block, "time_slot": slot}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Changed fields, alphabetical, in the fixed comment format.
    assert_eq!(
        latest_revision_comment(&pool, game).await,
        "AJAX Schedule Submission - location, time_block, time_slot Changed"
    );

    let stamped = last_scheduled(&pool, game).await.expect("must be stamped");
    assert!(stamped > pre);

    // The read endpoint now reports grid coordinates computed from the
    // assignment.
    let json = body_json(get(build_test_app(pool), "/api/v1/schedule").await).await;
    assert_eq!(json["games"][0]["start"], 1.0);
    assert_eq!(json["games"][0]["width"], 4.0);
    assert_eq!(json["games"][0]["location"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn identical_assignment_still_touches_last_scheduled(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let location = seed_location(&pool, con, "Main Hall").await;
    let block = seed_block(&pool, "Friday Night", 1).await;
    let slot = seed_slot(&pool, 19.0, 23.0).await;
    let game = seed_game(&pool, con, 1, "A Game").await;

    let body = json!({"id": game, "location": location, "time_block": block, "time_slot": slot});
    let auth = bearer(7, ROLE_STAFF);

    let response = send_json(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/schedule",
        Some(&auth),
        &body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = last_scheduled(&pool, game).await.unwrap();

    // Same assignment again: empty changed list (note the double space),
    // but the timestamp still advances.
    let response = send_json(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/schedule",
        Some(&auth),
        &body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        latest_revision_comment(&pool, game).await,
        "AJAX Schedule Submission -  Changed"
    );
    let second = last_scheduled(&pool, game).await.unwrap();
    assert!(second > first);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn absent_identifiers_clear_schedule_fields(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let location = seed_location(&pool, con, "Main Hall").await;
    let block = seed_block(&pool, "Friday Night", 1).await;
    let slot = seed_slot(&pool, 19.0, 23.0).await;
    let game = seed_game(&pool, con, 1, "A Game").await;
    sqlx::query("UPDATE games SET location_id = $1, time_block_id = $2, time_slot_id = $3 WHERE id = $4")
        .bind(location)
        .bind(block)
        .bind(slot)
        .bind(game)
        .execute(&pool)
        .await
        .unwrap();

    let response = send_json(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        &json!({"id": game}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        latest_revision_comment(&pool, game).await,
        "AJAX Schedule Submission - location, time_block, time_slot Changed"
    );

    let row: (Option<i64>, Option<i64>, Option<i64>) = sqlx::query_as(
        "SELECT location_id, time_block_id, time_slot_id FROM games WHERE id = $1",
    )
    .bind(game)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row, (None, None, None));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_body_is_rejected_in_the_envelope(pool: PgPool) {
    seed_convention(&pool).await;

    let response = send_raw(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        "application/json",
        "{not json",
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_json_content_type_is_rejected_in_the_envelope(pool: PgPool) {
    seed_convention(&pool).await;

    let response = send_raw(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        "text/plain",
        "{\"id\": 1}",
    )
    .await;

    assert_error_envelope(response, StatusCode::UNSUPPORTED_MEDIA_TYPE).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_game_id_is_not_found(pool: PgPool) {
    seed_convention(&pool).await;

    let response = send_json(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        &json!({"id": 9999}),
    )
    .await;

    let envelope = assert_error_envelope(response, StatusCode::NOT_FOUND).await;
    assert_eq!(envelope["content"], "Game with id 9999 not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_location_id_is_not_found(pool: PgPool) {
    let con = seed_convention(&pool).await;
    let game = seed_game(&pool, con, 1, "A Game").await;

    let response = send_json(
        build_test_app(pool),
        Method::POST,
        "/api/v1/schedule",
        Some(&bearer(7, ROLE_STAFF)),
        &json!({"id": game, "location": 9999}),
    )
    .await;

    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

// ---------------------------------------------------------------------------
// Current-convention invariant
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn no_current_convention_is_an_opaque_server_fault(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/schedule").await;

    let envelope = assert_error_envelope(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    // Non-debug mode flattens server faults to the opaque message.
    assert_eq!(
        envelope["content"],
        "An error occurred while processing an AJAX request"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn multiple_current_conventions_is_a_server_fault(pool: PgPool) {
    seed_convention(&pool).await;
    seed_convention(&pool).await;

    let response = get(build_test_app(pool), "/api/v1/schedule").await;
    assert_error_envelope(response, StatusCode::INTERNAL_SERVER_ERROR).await;
}
