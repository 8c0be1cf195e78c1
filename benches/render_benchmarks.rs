use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordtap::session::caret::CaretPositioner;
use wordtap::session::store::Snapshot;
use wordtap::session::surface::build_surface;
use wordtap::ui::components::typing_area::layout_blocks;

fn make_words(count: usize) -> Vec<String> {
    let pool = ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
    (0..count).map(|i| pool[i % pool.len()].to_string()).collect()
}

fn bench_build_surface(c: &mut Criterion) {
    let words = make_words(1000);
    // Half done, a few with surplus characters.
    let history: Vec<String> = words[..500]
        .iter()
        .enumerate()
        .map(|(i, w)| if i % 10 == 0 { format!("{w}xx") } else { w.clone() })
        .collect();
    let snapshot = Snapshot {
        words: &words,
        active_word: words.get(history.len()).map(String::as_str),
        user_input: "qu",
        history: &history,
    };
    let caret = CaretPositioner::new(1);

    c.bench_function("build_surface (1000 words)", |b| {
        b.iter(|| build_surface(black_box(&snapshot), &caret))
    });

    let surface = build_surface(&snapshot, &caret);
    c.bench_function("layout_blocks (1000 words, 80 cols)", |b| {
        b.iter(|| layout_blocks(black_box(&surface), 80))
    });
}

criterion_group!(benches, bench_build_surface);
criterion_main!(benches);
