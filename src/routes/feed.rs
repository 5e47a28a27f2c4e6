use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    dto::{FeedParams, FeedResponse, PostGroup},
    feed::{GroupBy, ViewMode},
    models::Post,
    states::AppState,
};

/// GET /feed?category=<id>&year=2024&view=timeline&group=day
///
/// Public: the feed is browsable without a session. Echoes the active
/// filters back alongside the data so a client can render its controls.
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Json<FeedResponse> {
    let view = ViewMode::parse(params.view.as_deref().unwrap_or("feed"));
    let group_by = GroupBy::parse(params.group.as_deref().unwrap_or("month"));

    let page = state.list_feed(params.category, params.year, view, group_by);

    Json(FeedResponse {
        posts: page.posts.into_iter().map(Into::into).collect(),
        grouped_posts: page.grouped_posts.map(into_groups),
        grouped_feed: page.grouped_feed.map(into_groups),
        categories: state
            .list_categories()
            .into_iter()
            .map(Into::into)
            .collect(),
        selected_category: params.category,
        selected_year: params.year,
        available_years: page.available_years,
        view,
        group_by,
    })
}

fn into_groups(groups: Vec<(String, Vec<Post>)>) -> Vec<PostGroup> {
    groups
        .into_iter()
        .map(|(label, posts)| PostGroup {
            label,
            posts: posts.into_iter().map(Into::into).collect(),
        })
        .collect()
}
