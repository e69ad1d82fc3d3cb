use eatreal::usecase::auth::CompanionCandidatesUseCase;
use eatreal::usecase::profile::ProfileUseCase;

use crate::helpers::{Store, admin_user, seed_review, test_user};

#[tokio::test]
async fn should_summarize_own_reviews_on_profile() {
    let alice = test_user(1, "alice@example.com");
    let bob = test_user(2, "bob@example.com");
    let store = Store::with_users(vec![alice.clone(), bob.clone()]);
    let sperl = store.add_restaurant("Café Sperl", 48.1999, 16.3604);
    let central = store.add_restaurant("Café Central", 48.2104, 16.3655);
    seed_review(&store, &alice, &sperl, 5, 3, &[]);
    seed_review(&store, &alice, &sperl, 4, 2, &[]);
    seed_review(&store, &alice, &central, 4, 1, &[]);
    seed_review(&store, &bob, &central, 1, 1, &[]);

    let profile = ProfileUseCase {
        visits: store.visits(),
    }
    .execute(&alice)
    .await
    .unwrap();

    assert_eq!(profile.user.email, "alice@example.com");
    assert_eq!(profile.reviews.len(), 3);
    assert!(profile.reviews.iter().all(|r| r.user.id == alice.id));
    assert_eq!(profile.stats.total_reviews, 3);
    assert_eq!(profile.stats.average_rating, 4.3);
    assert_eq!(profile.stats.unique_restaurants, 2);
}

#[tokio::test]
async fn should_show_empty_stats_without_reviews() {
    let alice = test_user(1, "alice@example.com");
    let store = Store::with_users(vec![alice.clone()]);

    let profile = ProfileUseCase {
        visits: store.visits(),
    }
    .execute(&alice)
    .await
    .unwrap();

    assert!(profile.reviews.is_empty());
    assert_eq!(profile.stats.average_rating, 0.0);
}

#[tokio::test]
async fn should_list_friends_in_both_directions() {
    let alice = test_user(1, "alice@example.com");
    let bob = test_user(2, "bob@example.com");
    let carol = test_user(3, "carol@example.com");
    let admin = admin_user(4, "adm@example.com");
    let store = Store::with_users(vec![alice.clone(), bob, carol, admin.clone()]);
    store.friends.lock().unwrap().extend([(1, 2), (3, 1)]);
    let usecase = CompanionCandidatesUseCase {
        repo: store.users(),
    };

    let mut ids: Vec<i32> = usecase
        .execute(&alice)
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 3]);

    let for_admin = usecase.execute(&admin).await.unwrap();
    assert_eq!(for_admin.len(), 3);
    assert!(for_admin.iter().all(|u| u.id != admin.id));
}
