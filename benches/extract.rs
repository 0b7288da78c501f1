// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ptcgp_scrape::extract;

/// Synthetic table in the source page's shape: long evolution lines with
/// abilities, attacks and retreat rows, plus the occasional trainer row.
fn synthetic_table(rows: usize) -> String {
    let mut out = String::with_capacity(rows * 700);
    out.push_str("<tr><th>No.</th><th>Card No</th><th>Name</th></tr>");
    for i in 0..rows {
        let stage = match i % 3 {
            0 => "Basic",
            1 => "Stage 1",
            _ => "Stage 2",
        };
        out.push_str(&format!(
            "<tr>\
             <td>{n}</td>\
             <td>A1 {n:03}</td>\
             <td><a href=\"/archives/{n}\">Mon {line}</a></td>\
             <td>◇</td>\
             <td>70</td>\
             <td><img alt=\"Pokemon TCG Pocket - Grass\"></td>\
             <td>-</td>\
             <td>{stage}</td>\
             <td>-</td>\
             <td class=\"left\">\
             <div class=\"align\"><b>Retreat Cost</b> \
             <img alt=\"Pokemon TCG Pocket - Colorless 2\" width=\"40\"></div>\
             <span class=\"a-red\">Ability</span> Overgrow<br>\
             Do 10 more damage while damaged.\
             <div class=\"align\"><b>Slash</b> \
             <img alt=\"Pokemon TCG Pocket - Grass\" width=\"20\">\
             <img alt=\"Pokemon TCG Pocket - Colorless 2\" width=\"40\"></div>\
             60<br>Flip a coin. If tails, this attack does nothing.\
             </td>\
             </tr>",
            n = i + 1,
            line = i / 3,
            stage = stage,
        ));
    }
    out
}

fn bench_extract(c: &mut Criterion) {
    let table = synthetic_table(300);

    c.bench_function("extract_cards_300_rows", |b| {
        b.iter(|| {
            let cards = extract::extract_cards(black_box(&table)).unwrap();
            black_box(cards.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
