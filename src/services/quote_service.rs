//! Static quote collection served on the public site.

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Quote {
    pub content: &'static str,
    pub author: &'static str,
}

const QUOTES: &[Quote] = &[
    Quote {
        content: "The universe is change; our life is what our thoughts make it.",
        author: "Marcus Aurelius",
    },
    Quote {
        content: "It is not death that a man should fear, but he should fear never beginning to live.",
        author: "Marcus Aurelius",
    },
    Quote {
        content: "I have not failed. I've just found 10,000 ways that won't work.",
        author: "Thomas Edison",
    },
    Quote {
        content: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        content: "In the middle of difficulty lies opportunity.",
        author: "Albert Einstein",
    },
    Quote {
        content: "Imagination is more important than knowledge.",
        author: "Albert Einstein",
    },
    Quote {
        content: "The greatest glory in living lies not in never falling, but in rising every time we fall.",
        author: "Nelson Mandela",
    },
    Quote {
        content: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
    },
    Quote {
        content: "Your time is limited, so don't waste it living someone else's life.",
        author: "Steve Jobs",
    },
    Quote {
        content: "If life were predictable it would cease to be life, and be without flavor.",
        author: "Eleanor Roosevelt",
    },
    Quote {
        content: "Life is what happens when you're busy making other plans.",
        author: "John Lennon",
    },
    Quote {
        content: "Spread love everywhere you go. Let no one ever come to you without leaving happier.",
        author: "Mother Teresa",
    },
    Quote {
        content: "When you reach the end of your rope, tie a knot in it and hang on.",
        author: "Franklin D. Roosevelt",
    },
    Quote {
        content: "Always remember that you are absolutely unique. Just like everyone else.",
        author: "Margaret Mead",
    },
    Quote {
        content: "You must be the change you wish to see in the world.",
        author: "Mahatma Gandhi",
    },
    Quote {
        content: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
    },
    Quote {
        content: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    Quote {
        content: "It is during our darkest moments that we must focus to see the light.",
        author: "Aristotle",
    },
    Quote {
        content: "Do not go where the path may lead, go instead where there is no path and leave a trail.",
        author: "Ralph Waldo Emerson",
    },
    Quote {
        content: "The best and most beautiful things in the world cannot be seen or even touched - they must be felt with the heart.",
        author: "Helen Keller",
    },
    Quote {
        content: "It is better to fail in originality than to succeed in imitation.",
        author: "Herman Melville",
    },
    Quote {
        content: "The road to success and the road to failure are almost exactly the same.",
        author: "Colin R. Davis",
    },
    Quote {
        content: "The question isn't who is going to let me; it's who is going to stop me.",
        author: "Ayn Rand",
    },
    Quote {
        content: "Don't count the days, make the days count.",
        author: "Muhammad Ali",
    },
    Quote {
        content: "The only impossible journey is the one you never begin.",
        author: "Tony Robbins",
    },
    Quote {
        content: "The best revenge is massive success.",
        author: "Frank Sinatra",
    },
    Quote {
        content: "Twenty years from now you will be more disappointed by the things that you didn't do than by the ones you did do.",
        author: "Mark Twain",
    },
    Quote {
        content: "Great minds discuss ideas; average minds discuss events; small minds discuss people.",
        author: "Eleanor Roosevelt",
    },
    Quote {
        content: "Those who dare to fail miserably can achieve greatly.",
        author: "John F. Kennedy",
    },
    Quote {
        content: "A successful man is one who can lay a firm foundation with the bricks others have thrown at him.",
        author: "David Brinkley",
    },
];

// Curated index sets into QUOTES, per tag.
const TAGS: &[(&str, &[usize])] = &[
    ("wisdom", &[0, 1, 4, 17, 18, 27]),
    ("success", &[3, 7, 8, 16, 21, 22, 25, 29]),
    ("inspiration", &[2, 6, 11, 15, 19, 24, 26]),
    ("philosophy", &[0, 1, 5, 14, 18]),
    ("life", &[9, 10, 12, 13, 20, 23, 28]),
];

#[derive(Default)]
pub struct QuoteService;

impl QuoteService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks a uniformly random quote from the collection.
    #[must_use]
    pub fn random(&self) -> Quote {
        let index = rand::rng().random_range(0..QUOTES.len());
        QUOTES[index].clone()
    }

    /// Picks a random quote from the named tag, or from the whole
    /// collection when the tag is unknown.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Quote {
        let Some((_, indices)) = TAGS.iter().find(|(name, _)| *name == tag) else {
            return self.random();
        };

        let pick = rand::rng().random_range(0..indices.len());
        QUOTES[indices[pick]].clone()
    }

    /// Tag names accepted by [`by_tag`](Self::by_tag).
    #[must_use]
    pub fn available_tags(&self) -> Vec<&'static str> {
        TAGS.iter().map(|(name, _)| *name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_returns_a_collection_member() {
        let service = QuoteService::new();
        for _ in 0..20 {
            let quote = service.random();
            assert!(QUOTES.contains(&quote));
        }
    }

    #[test]
    fn test_by_tag_draws_from_the_tag_indices() {
        let service = QuoteService::new();
        let wisdom: Vec<Quote> = [0, 1, 4, 17, 18, 27]
            .iter()
            .map(|&i| QUOTES[i].clone())
            .collect();

        for _ in 0..20 {
            let quote = service.by_tag("wisdom");
            assert!(wisdom.contains(&quote));
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_full_collection() {
        let service = QuoteService::new();
        let quote = service.by_tag("no-such-tag");
        assert!(QUOTES.contains(&quote));
    }

    #[test]
    fn test_tag_indices_are_in_bounds() {
        for (tag, indices) in TAGS {
            assert!(!indices.is_empty(), "tag {tag} has no quotes");
            for &i in *indices {
                assert!(i < QUOTES.len(), "tag {tag} index {i} out of bounds");
            }
        }
    }

    #[test]
    fn test_available_tags() {
        let service = QuoteService::new();
        assert_eq!(
            service.available_tags(),
            vec!["wisdom", "success", "inspiration", "philosophy", "life"]
        );
    }
}
