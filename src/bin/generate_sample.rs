//! Writes a synthetic anime catalog CSV so the dashboard can be exercised
//! without the real dataset: `cargo run --bin generate_sample`.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// 1..=n distinct picks, list-literal encoded like the real export.
    fn pick_tokens(&mut self, pool: &[&str], max: usize) -> String {
        let n = 1 + (self.next_u64() as usize) % max;
        let mut picked: Vec<&str> = Vec::new();
        while picked.len() < n {
            let candidate = *self.pick(pool);
            if !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
        format!("['{}']", picked.join("', '"))
    }
}

const GENRES: [&str; 10] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Slice of Life",
];

const THEMES: [&str; 8] = [
    "Isekai",
    "Mecha",
    "Military",
    "Music",
    "Psychological",
    "School",
    "Space",
    "Super Power",
];

const DEMOGRAPHICS: [&str; 5] = ["Shounen", "Shoujo", "Seinen", "Josei", "Kids"];
const TYPES: [&str; 4] = ["TV", "Movie", "OVA", "ONA"];
const STATUSES: [&str; 2] = ["Finished Airing", "Currently Airing"];
const RATINGS: [&str; 4] = ["G", "PG-13", "R", "R+"];

const NAME_HEADS: [&str; 8] = [
    "Crimson", "Eternal", "Silent", "Wandering", "Stellar", "Midnight", "Golden", "Phantom",
];
const NAME_TAILS: [&str; 8] = [
    "Blade", "Academy", "Requiem", "Horizon", "Chronicle", "Garden", "Paradox", "Symphony",
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let count: usize = 64;

    let output_path = "data/top_animes.csv";
    std::fs::create_dir_all("data").expect("Failed to create data directory");
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "Name",
            "Favorites",
            "Episodes",
            "Type",
            "Demographics",
            "Themes",
            "Genres",
            "Rating",
            "Status",
            "Score",
            "Members",
            "Popularity",
            "Ranked",
            "Aired",
        ])
        .expect("Failed to write header");

    for i in 0..count {
        let name = format!(
            "{} {} {}",
            NAME_HEADS[i % NAME_HEADS.len()],
            NAME_TAILS[(i / NAME_HEADS.len()) % NAME_TAILS.len()],
            i / (NAME_HEADS.len() * NAME_TAILS.len()) + 1
        );

        let favorites = (rng.next_f64() * 40_000.0) as u64;
        let members = favorites * 10 + (rng.next_f64() * 100_000.0) as u64;
        let score = 5.0 + rng.next_f64() * 4.5;
        // A few unknowns, like the real export.
        let episodes = if rng.next_f64() < 0.1 {
            "Unknown".to_string()
        } else {
            format!("{}", 1 + (rng.next_u64() % 64))
        };
        let year = 1995 + (rng.next_u64() % 30);

        let row: [String; 14] = [
            name,
            favorites.to_string(),
            episodes,
            rng.pick(&TYPES).to_string(),
            rng.pick_tokens(&DEMOGRAPHICS, 2),
            rng.pick_tokens(&THEMES, 3),
            rng.pick_tokens(&GENRES, 3),
            rng.pick(&RATINGS).to_string(),
            rng.pick(&STATUSES).to_string(),
            format!("{score:.2}"),
            members.to_string(),
            (i + 1).to_string(),
            (count - i).to_string(),
            format!("Apr {year}"),
        ];
        writer.write_record(&row).expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {count} titles to {output_path}");
}
