//! Rooms past the end of the catalog ("infinite mode").
//!
//! Every call draws fresh operands, so the same room id yields a different
//! question each time. Nothing is cached.

use rand::Rng;

use super::types::{Interactable, RoomDefinition};

/// Generated hints are scattered inside this box, which sits within the stage.
pub const SCATTER_WIDTH: f32 = 700.0;
pub const SCATTER_HEIGHT: f32 = 300.0;

pub fn generate<R: Rng + ?Sized>(room_id: u32, rng: &mut R) -> RoomDefinition {
    let a: u32 = rng.gen_range(0..10);
    let b: u32 = rng.gen_range(0..10);
    RoomDefinition {
        id: room_id,
        kind: "random".to_string(),
        prompt: format!("System fault. Enter the recovery code [ {a} + {b} ]."),
        interactables: vec![Interactable {
            x: rng.gen_range(0.0..SCATTER_WIDTH),
            y: rng.gen_range(0.0..SCATTER_HEIGHT),
            hint: "Noise...".to_string(),
        }],
        expected_answer: (a + b).to_string(),
        entry_message: Some("Incomplete data sector.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn operands(prompt: &str) -> (u32, u32) {
        let inner = prompt
            .split('[')
            .nth(1)
            .and_then(|s| s.split(']').next())
            .expect("bracketed operands");
        let mut parts = inner.split('+').map(|p| p.trim().parse::<u32>().expect("digit"));
        (parts.next().expect("lhs"), parts.next().expect("rhs"))
    }

    #[test]
    fn answer_is_sum_of_prompt_operands() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 14..200 {
            let room = generate(id, &mut rng);
            let (a, b) = operands(&room.prompt);
            assert!(a <= 9 && b <= 9);
            assert_eq!(room.expected_answer, (a + b).to_string());
            assert_eq!(room.id, id);
            assert_eq!(room.kind, "random");
        }
    }

    #[test]
    fn exactly_one_interactable_inside_scatter_box() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let room = generate(20, &mut rng);
            assert_eq!(room.interactables.len(), 1);
            let spot = &room.interactables[0];
            assert!((0.0..SCATTER_WIDTH).contains(&spot.x));
            assert!((0.0..SCATTER_HEIGHT).contains(&spot.y));
        }
    }

    #[test]
    fn repeated_generation_can_change_the_answer() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate(14, &mut rng);
        let changed = (0..50).any(|_| generate(14, &mut rng).prompt != first.prompt);
        assert!(changed, "generator should not be idempotent");
    }
}
