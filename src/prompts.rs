//! "Surprise me" prompts.

use rand::seq::SliceRandom;

/// Prompts offered when the user asks for a random idea.
pub const SURPRISE_PROMPTS: &[&str] = &[
    "fighting off a horde of zombies with a frying pan",
    "riding a dragon over a volcano at sunset",
    "fencing with a ghost in a haunted library",
    "surfing a giant wave made of cereal milk",
    "piloting a paper airplane through a thunderstorm",
    "playing chess against a robot in a neon arcade",
    "hiking up a mountain of stacked pancakes",
    "conducting an orchestra of cats in a moonlit forest",
    "escaping a maze of mirrors on roller skates",
    "planting flowers on the surface of the moon",
    "racing a cheetah on a hoverboard across the desert",
    "taming a thunder cloud shaped like a wolf",
    "sword fighting a pirate on a sinking ship",
    "painting the northern lights from a hot air balloon",
    "exploring a sunken city with a glowing jellyfish guide",
    "building a snowman that comes to life in a blizzard",
    "skateboarding through a cyberpunk city in the rain",
    "sharing tea with a giant tortoise in a bamboo grove",
    "juggling planets in a pixel-art galaxy",
    "winning a dance battle against a disco skeleton",
];

/// Returns a random prompt different from `current`.
pub fn random_prompt(current: &str) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let candidate = SURPRISE_PROMPTS
            .choose(&mut rng)
            .copied()
            .unwrap_or_default();
        if candidate != current {
            return candidate.to_string();
        }
    }
}
