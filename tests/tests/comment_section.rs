use tests::example_section;
use unihub_api::{CommentId, EventId, ReactionKind};
use unihub_client::{forest, LoadState, SortMode};
use unihub_mock_server::{MockApi, MockServer};

#[tokio::test]
async fn load_empty_event() {
    let (_api, mut section, _event) = example_section();
    assert_eq!(section.state(), LoadState::Loading);
    section.load().await;
    assert_eq!(section.state(), LoadState::Loaded);
    assert_eq!(section.comments().len(), 0);
    // the ranker over an empty forest is empty whatever the settings
    for (mode, page_size, page) in [
        (SortMode::Time, 5, 1),
        (SortMode::Popularity, 10, 1),
        (SortMode::Time, 5, 3),
    ] {
        section.set_sort(mode);
        section.set_page_size(page_size);
        section.set_page(page);
        assert_eq!(section.visible().len(), 0);
    }
    assert_eq!(section.page_count(), 0);
}

#[tokio::test]
async fn submit_then_reload_round_trips() {
    let (api, mut section, event) = example_section();
    section.load().await;
    assert!(section.submit_comment("first!").await);
    assert!(section.submit_comment("second").await);
    assert_eq!(section.comments().len(), 2);

    // a fresh section on the same event sees the same forest
    let mut other = unihub_client::CommentSection::new(api.clone(), event);
    other.load().await;
    assert_eq!(other.comments(), section.comments());
}

#[tokio::test]
async fn reply_nests_under_parent() {
    let (_api, mut section, _event) = example_section();
    section.load().await;
    assert!(section.submit_comment("A").await);
    assert!(section.submit_comment("B").await);
    let parent = section.comments()[1].id;

    assert!(section.submit_reply(parent, "C").await);

    // still exactly two top-level comments, with the reply under B
    assert_eq!(section.comments().len(), 2);
    let b = &section.comments()[1];
    assert_eq!(b.replies.len(), 1);
    assert_eq!(b.replies[0].content, "C");
    assert_eq!(b.replies[0].parent_id, Some(parent));
    assert_eq!(b.replies[0].replies.len(), 0);
}

#[tokio::test]
async fn reply_to_reply_nests_at_depth() {
    let (_api, mut section, _event) = example_section();
    section.load().await;
    assert!(section.submit_comment("top").await);
    let top = section.comments()[0].id;
    assert!(section.submit_reply(top, "first level").await);
    let mid = section.comments()[0].replies[0].id;
    assert!(section.submit_reply(mid, "second level").await);

    let deep = &section.comments()[0].replies[0].replies[0];
    assert_eq!(deep.content, "second level");
    assert_eq!(deep.parent_id, Some(mid));
    assert_eq!(forest::count(section.comments()), 3);
}

#[tokio::test]
async fn react_then_sort_by_popularity() {
    let (api, mut section, event) = example_section();
    let (a, b) = api.with_server(|s| {
        (
            s.test_seed_comment(event, None, "A", 5, 1),
            s.test_seed_comment(event, None, "B", 10, 2),
        )
    });
    section.load().await;

    section.react(a, ReactionKind::Like).await;
    let liked = forest::find_in(section.comments(), a).expect("comment A is in the forest");
    assert_eq!(liked.like_count, 6);
    assert!(liked.liked_by_current_user);

    section.set_sort(SortMode::Popularity);
    let page = section.visible();
    // B scores 8, A scores 5
    assert_eq!(
        page.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![b, a],
    );
}

#[tokio::test]
async fn blank_submission_sends_nothing() {
    let (api, mut section, _event) = example_section();
    section.load().await;
    let calls_after_load = api.num_calls();

    assert!(!section.submit_comment("").await);
    assert!(!section.submit_comment("   ").await);
    assert!(!section.submit_reply(CommentId(1), "\n\t").await);

    assert_eq!(api.num_calls(), calls_after_load);
    assert_eq!(section.comments().len(), 0);
}

#[tokio::test]
async fn fetch_failure_leaves_an_empty_loaded_section() {
    let (api, mut section, _event) = example_section();
    api.set_failing(true);
    section.load().await;
    // no distinct error state: the view shows its no-comments affordance
    assert_eq!(section.state(), LoadState::Loaded);
    assert_eq!(section.comments().len(), 0);
    assert_eq!(section.visible().len(), 0);
}

#[tokio::test]
async fn submission_failure_keeps_the_forest() {
    let (api, mut section, _event) = example_section();
    section.load().await;
    assert!(section.submit_comment("kept").await);
    let before = section.comments().to_vec();

    api.set_failing(true);
    assert!(!section.submit_comment("lost").await);
    assert!(!section.submit_reply(before[0].id, "also lost").await);
    assert_eq!(section.comments(), &before[..]);

    // the server never saw the failed submissions either
    api.set_failing(false);
    section.load().await;
    assert_eq!(section.comments(), &before[..]);
}

#[tokio::test]
async fn reaction_failure_changes_nothing() {
    let (api, mut section, event) = example_section();
    let id = api.with_server(|s| s.test_seed_comment(event, None, "A", 3, 0));
    section.load().await;
    let before = section.comments().to_vec();

    api.set_failing(true);
    section.react(id, ReactionKind::Like).await;
    assert_eq!(section.comments(), &before[..]);
}

#[tokio::test]
async fn toggles_stay_in_sync_with_the_server() {
    let (api, mut section, event) = example_section();
    let id = api.with_server(|s| s.test_seed_comment(event, None, "A", 0, 0));
    section.load().await;

    let steps = [
        ReactionKind::Like,    // -> liked
        ReactionKind::Like,    // -> removed
        ReactionKind::Like,    // -> liked again
        ReactionKind::Dislike, // -> dislike replaces like
        ReactionKind::Dislike, // -> removed
    ];
    for kind in steps {
        section.react(id, kind).await;
        let local = forest::find_in(section.comments(), id)
            .expect("comment is in the forest")
            .clone();
        assert!(!(local.liked_by_current_user && local.disliked_by_current_user));
        let on_server = api.with_server(|s| {
            forest::find_in(&s.list_comments(event).expect("event is registered"), id)
                .expect("comment is on the server")
                .clone()
        });
        assert_eq!(local, on_server);
    }
    let final_state = forest::find_in(section.comments(), id).unwrap();
    assert_eq!(final_state.like_count, 0);
    assert_eq!(final_state.dislike_count, 0);
    assert!(!final_state.liked_by_current_user);
    assert!(!final_state.disliked_by_current_user);
}

#[tokio::test]
async fn reply_to_unknown_parent_is_rejected_by_the_server() {
    let (_api, mut section, _event) = example_section();
    section.load().await;
    assert!(!section.submit_reply(CommentId(999), "orphan").await);
    assert_eq!(section.comments().len(), 0);
}

#[tokio::test]
async fn sort_and_page_size_changes_reset_the_page() {
    let (api, mut section, event) = example_section();
    api.with_server(|s| {
        for i in 0..12 {
            s.test_seed_comment(event, None, &format!("c{i}"), i, 0);
        }
    });
    section.load().await;

    section.set_page_size(5);
    section.set_page(3);
    assert_eq!(section.visible().len(), 2);
    assert_eq!(section.page_count(), 3);

    section.set_sort(SortMode::Popularity);
    assert_eq!(section.page(), 1);
    assert_eq!(section.visible().len(), 5);

    section.set_page(2);
    section.set_page_size(10);
    assert_eq!(section.page(), 1);
    assert_eq!(section.visible().len(), 10);
}

#[tokio::test]
async fn unknown_event_fetch_is_a_logged_empty_state() {
    tests::init_tracing();
    let api = MockApi::new(MockServer::new());
    let mut section = unihub_client::CommentSection::new(api, EventId(42));
    section.load().await;
    assert_eq!(section.state(), LoadState::Loaded);
    assert_eq!(section.comments().len(), 0);
}
