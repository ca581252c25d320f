use crate::models::{
    Claim, ClaimStatus, ClaimWithGiveaway, Condition, Giveaway, NewClaim, NewGiveaway, NewUser,
    User,
};
use chrono::{Duration, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the store. The mutex keeps every operation atomic when
/// the server runs handlers concurrently, which is what preserves unique id
/// assignment across requests.
pub type SharedStorage = Arc<Mutex<MemStorage>>;

pub fn shared(storage: MemStorage) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

/// In-memory tables for users, giveaways and claims. Sole owner and writer
/// of all entity state; ids come from per-table monotonic counters starting
/// at 1 and are never reused.
pub struct MemStorage {
    users: BTreeMap<i64, User>,
    giveaways: BTreeMap<i64, Giveaway>,
    claims: BTreeMap<i64, Claim>,
    next_user_id: i64,
    next_giveaway_id: i64,
    next_claim_id: i64,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            users: BTreeMap::new(),
            giveaways: BTreeMap::new(),
            claims: BTreeMap::new(),
            next_user_id: 1,
            next_giveaway_id: 1,
            next_claim_id: 1,
        }
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.values().find(|u| u.username == username).cloned()
    }

    /// Stores a new user. Usernames are meant to be unique but duplicates
    /// are not rejected here; see DESIGN.md.
    pub fn create_user(&mut self, new_user: NewUser) -> User {
        let id = self.next_user_id;
        self.next_user_id += 1;

        let user = User {
            id,
            username: new_user.username,
            password: new_user.password,
        };
        self.users.insert(id, user.clone());
        user
    }

    /// Snapshot of every active giveaway, newest first. Ties on `created_at`
    /// keep ascending id order (stable sort over the ordered table).
    pub fn all_giveaways(&self) -> Vec<Giveaway> {
        let mut giveaways: Vec<Giveaway> = self
            .giveaways
            .values()
            .filter(|g| g.is_active == "true")
            .cloned()
            .collect();
        giveaways.sort_by_key(|g| Reverse(g.created_at));
        giveaways
    }

    pub fn giveaway(&self, id: i64) -> Option<Giveaway> {
        self.giveaways.get(&id).cloned()
    }

    pub fn create_giveaway(&mut self, new_giveaway: NewGiveaway) -> Giveaway {
        let id = self.next_giveaway_id;
        self.next_giveaway_id += 1;

        let now = Utc::now();
        let giveaway = Giveaway {
            id,
            title: new_giveaway.title,
            description: new_giveaway.description,
            category: new_giveaway.category,
            estimated_value: new_giveaway.estimated_value,
            image_url: new_giveaway.image_url,
            host_username: new_giveaway.host_username,
            condition: new_giveaway.condition.unwrap_or(Condition::New),
            location: new_giveaway.location,
            is_active: "true".to_string(),
            created_at: now,
            end_date: now + Duration::days(new_giveaway.duration),
            claimed_by: None,
        };
        self.giveaways.insert(id, giveaway.clone());
        giveaway
    }

    /// Records a claim and marks the target giveaway as claimed by the
    /// claimer. A later claim on the same giveaway overwrites `claimed_by`;
    /// a claim against an unknown giveaway id still produces a Claim row
    /// but touches nothing else. Both behaviors match the original system
    /// and are recorded as open questions in DESIGN.md.
    pub fn create_claim(&mut self, new_claim: NewClaim) -> Claim {
        let id = self.next_claim_id;
        self.next_claim_id += 1;

        let claim = Claim {
            id,
            giveaway_id: new_claim.giveaway_id,
            claimer_name: new_claim.claimer_name,
            claimer_contact: new_claim.claimer_contact,
            claimed_at: Utc::now(),
            status: ClaimStatus::Pending,
        };

        if let Some(giveaway) = self.giveaways.get_mut(&new_claim.giveaway_id) {
            giveaway.claimed_by = Some(claim.claimer_name.clone());
        }

        self.claims.insert(id, claim.clone());
        claim
    }

    /// Claims against giveaways hosted by `host_username`, most recent
    /// first, each joined with its giveaway.
    pub fn claims_by_host(&self, host_username: &str) -> Vec<ClaimWithGiveaway> {
        let mut result: Vec<ClaimWithGiveaway> = self
            .claims
            .values()
            .filter_map(|claim| {
                let giveaway = self.giveaways.get(&claim.giveaway_id)?;
                if giveaway.host_username == host_username {
                    Some(ClaimWithGiveaway {
                        claim: claim.clone(),
                        giveaway: giveaway.clone(),
                    })
                } else {
                    None
                }
            })
            .collect();
        result.sort_by_key(|c| Reverse(c.claim.claimed_at));
        result
    }

    #[cfg(test)]
    pub(crate) fn giveaway_mut(&mut self, id: i64) -> Option<&mut Giveaway> {
        self.giveaways.get_mut(&id)
    }

    #[cfg(test)]
    pub(crate) fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Storage preloaded with the demo listings the UI shows on a fresh
    /// start. Not used by tests.
    pub fn with_sample_data() -> Self {
        let mut storage = MemStorage::new();
        let samples = [
            (
                "Premium Wireless Headphones",
                "Experience crystal-clear audio with these top-of-the-line wireless headphones featuring noise cancellation and 30-hour battery life.",
                "electronics",
                29900,
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "TechLover92",
                Condition::New,
                "Downtown",
                7,
            ),
            (
                "Bearded Brownies Deluxe Box",
                "Our signature brownie collection featuring 12 gourmet flavors, each crafted with premium ingredients and a touch of magic.",
                "food",
                8500,
                "https://images.unsplash.com/photo-1606313564200-e75d5e30476c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "BeardedBaker",
                Condition::New,
                "Midtown",
                3,
            ),
            (
                "Latest Smartphone",
                "Brand new flagship smartphone with cutting-edge camera technology, lightning-fast processor, and all-day battery life.",
                "electronics",
                99900,
                "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "GadgetGuru",
                Condition::New,
                "Uptown",
                14,
            ),
            (
                "Luxury Reading Chair",
                "Transform your reading corner with this plush, ergonomic chair designed for ultimate comfort during long reading sessions.",
                "home",
                45000,
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "HomeDesigner",
                Condition::LikeNew,
                "Suburbs",
                5,
            ),
            (
                "Photography Starter Kit",
                "Complete photography bundle including camera, lenses, tripod, and editing software to kickstart your photography journey.",
                "electronics",
                75000,
                "https://images.unsplash.com/photo-1502920917128-1aa500764cbd?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "PhotoPro",
                Condition::Good,
                "Creative District",
                10,
            ),
            (
                "Coffee Connoisseur Set",
                "Premium coffee collection with beans from around the world, grinder, French press, and brewing accessories.",
                "food",
                18000,
                "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "CoffeeMaster",
                Condition::New,
                "Coffee District",
                4,
            ),
            (
                "Gaming Accessories Bundle",
                "Level up your gaming with this complete RGB accessories set including mechanical keyboard, gaming mouse, and headset.",
                "electronics",
                32000,
                "https://images.unsplash.com/photo-1593640408182-31c70c8268f5?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "GamerPro",
                Condition::LikeNew,
                "Tech Quarter",
                6,
            ),
            (
                "Luxury Spa Experience",
                "Pamper yourself with this complete spa collection featuring organic oils, candles, bath salts, and premium towels.",
                "other",
                19500,
                "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600",
                "WellnessQueen",
                Condition::New,
                "Wellness Center",
                8,
            ),
        ];

        for (title, description, category, value, image_url, host, condition, location, duration) in
            samples
        {
            storage.create_giveaway(NewGiveaway {
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                estimated_value: value,
                image_url: image_url.to_string(),
                host_username: host.to_string(),
                duration,
                condition: Some(condition),
                location: Some(location.to_string()),
            });
        }
        storage
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        MemStorage::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn giveaway_input(title: &str, host: &str, duration: i64) -> NewGiveaway {
        NewGiveaway {
            title: title.to_string(),
            description: "desc".to_string(),
            category: "electronics".to_string(),
            estimated_value: 1000,
            image_url: "http://example.com/img.png".to_string(),
            host_username: host.to_string(),
            duration,
            condition: None,
            location: None,
        }
    }

    #[test]
    fn create_giveaway_computes_end_date_and_defaults() {
        let mut storage = MemStorage::new();
        let giveaway = storage.create_giveaway(giveaway_input("Mug", "bob", 7));

        assert_eq!(giveaway.id, 1);
        assert_eq!(giveaway.end_date - giveaway.created_at, Duration::days(7));
        assert_eq!(giveaway.condition, Condition::New);
        assert_eq!(giveaway.location, None);
        assert_eq!(giveaway.is_active, "true");
        assert_eq!(giveaway.claimed_by, None);
    }

    #[test]
    fn giveaway_ids_increment_from_one() {
        let mut storage = MemStorage::new();
        let first = storage.create_giveaway(giveaway_input("a", "bob", 1));
        let second = storage.create_giveaway(giveaway_input("b", "bob", 1));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn all_giveaways_sorted_newest_first_and_stable() {
        let mut storage = MemStorage::new();
        for i in 0..5 {
            let id = storage.create_giveaway(giveaway_input(&format!("g{i}"), "bob", 1)).id;
            // Spread creation times so the ordering is meaningful.
            storage.giveaways.get_mut(&id).unwrap().created_at =
                Utc::now() - Duration::minutes(5 - i);
        }

        let first = storage.all_giveaways();
        for pair in first.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }

        let second = storage.all_giveaways();
        let first_ids: Vec<i64> = first.iter().map(|g| g.id).collect();
        let second_ids: Vec<i64> = second.iter().map(|g| g.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn all_giveaways_skips_inactive() {
        let mut storage = MemStorage::new();
        let kept = storage.create_giveaway(giveaway_input("kept", "bob", 1)).id;
        let hidden = storage.create_giveaway(giveaway_input("hidden", "bob", 1)).id;
        storage.giveaways.get_mut(&hidden).unwrap().is_active = "false".to_string();

        let ids: Vec<i64> = storage.all_giveaways().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![kept]);
    }

    #[test]
    fn giveaway_lookup_of_unissued_id_is_none() {
        let storage = MemStorage::new();
        assert!(storage.giveaway(999_999).is_none());
    }

    #[test]
    fn claim_marks_giveaway_claimed() {
        let mut storage = MemStorage::new();
        let giveaway = storage.create_giveaway(giveaway_input("Mug", "bob", 7));

        let claim = storage.create_claim(NewClaim {
            giveaway_id: giveaway.id,
            claimer_name: "Alice".to_string(),
            claimer_contact: None,
        });

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.claimer_contact, None);
        assert_eq!(
            storage.giveaway(giveaway.id).unwrap().claimed_by,
            Some("Alice".to_string())
        );
    }

    #[test]
    fn second_claim_overwrites_claimer() {
        let mut storage = MemStorage::new();
        let giveaway = storage.create_giveaway(giveaway_input("Mug", "bob", 7));

        for name in ["Alice", "Zoe"] {
            storage.create_claim(NewClaim {
                giveaway_id: giveaway.id,
                claimer_name: name.to_string(),
                claimer_contact: None,
            });
        }

        assert_eq!(
            storage.giveaway(giveaway.id).unwrap().claimed_by,
            Some("Zoe".to_string())
        );
        assert_eq!(storage.claim_count(), 2);
    }

    #[test]
    fn claim_on_unknown_giveaway_still_recorded() {
        let mut storage = MemStorage::new();
        let claim = storage.create_claim(NewClaim {
            giveaway_id: 42,
            claimer_name: "Alice".to_string(),
            claimer_contact: None,
        });
        assert_eq!(claim.giveaway_id, 42);
        assert_eq!(storage.claim_count(), 1);
    }

    #[test]
    fn claims_by_host_joins_and_sorts_recent_first() {
        let mut storage = MemStorage::new();
        let bobs = storage.create_giveaway(giveaway_input("Mug", "bob", 7)).id;
        let carols = storage.create_giveaway(giveaway_input("Hat", "carol", 7)).id;

        storage.create_claim(NewClaim {
            giveaway_id: bobs,
            claimer_name: "Alice".to_string(),
            claimer_contact: None,
        });
        storage.create_claim(NewClaim {
            giveaway_id: carols,
            claimer_name: "Dan".to_string(),
            claimer_contact: None,
        });
        let late = storage.create_claim(NewClaim {
            giveaway_id: bobs,
            claimer_name: "Eve".to_string(),
            claimer_contact: Some("eve@example.com".to_string()),
        });
        storage.claims.get_mut(&late.id).unwrap().claimed_at = Utc::now() + Duration::minutes(1);

        let claims = storage.claims_by_host("bob");
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].claim.claimer_name, "Eve");
        assert_eq!(claims[1].claim.claimer_name, "Alice");
        assert_eq!(claims[0].giveaway.title, "Mug");

        assert!(storage.claims_by_host("nobody").is_empty());
    }

    #[test]
    fn users_round_trip_by_id_and_username() {
        let mut storage = MemStorage::new();
        let user = storage.create_user(NewUser {
            username: "bob".to_string(),
            password: "hunter2".to_string(),
        });

        assert_eq!(user.id, 1);
        assert_eq!(storage.get_user(user.id).unwrap().username, "bob");
        assert_eq!(storage.get_user_by_username("bob").unwrap().id, user.id);
        assert!(storage.get_user(2).is_none());
        assert!(storage.get_user_by_username("alice").is_none());
    }

    #[test]
    fn duplicate_usernames_are_accepted() {
        // Uniqueness is intended by the schema but not enforced anywhere.
        let mut storage = MemStorage::new();
        let first = storage.create_user(NewUser {
            username: "bob".to_string(),
            password: "one".to_string(),
        });
        let second = storage.create_user(NewUser {
            username: "bob".to_string(),
            password: "two".to_string(),
        });
        assert_ne!(first.id, second.id);
        // Lookup by name finds the earliest row.
        assert_eq!(storage.get_user_by_username("bob").unwrap().id, first.id);
    }

    #[test]
    fn sample_data_loads_eight_active_listings() {
        let storage = MemStorage::with_sample_data();
        let giveaways = storage.all_giveaways();
        assert_eq!(giveaways.len(), 8);
        assert!(giveaways.iter().all(|g| g.claimed_by.is_none()));
    }
}
