// src/extract/cards.rs
//
// Turns the card list table into Card records, one per data row.
// Single pass, in table order; the only state carried across rows is the
// output list itself, which later rows consult to resolve their
// evolution-chain back reference.

use crate::cards::{Ability, Attack, Card, PokemonCard, TrainerCard};
use crate::core::html::{
    attr_value, has_class, inner_after_open_tag, next_open_tag_ci, next_tag_block_ci,
    slice_between_ci, strip_tags,
};
use crate::core::nodes::{tokenize, Node};
use crate::core::sanitize::normalize_entities;
use crate::error::ExtractError;
use crate::params::{
    BASIC_STAGE, MIN_DATA_CELLS, RETREAT_LABEL, RETREAT_WIDTH_UNIT, TABLE_WRAPPER_CLASS,
    TRAINER_TYPES, TYPE_LABEL_PREFIX,
};

/// Extract cards from a whole page: locate the wrapped card table, then
/// run the row pass.
pub fn extract_from_doc(doc: &str) -> Result<Vec<Card>, ExtractError> {
    let t = std::time::Instant::now();

    let mut table = None;
    let mut pos = 0usize;
    while let Some((d_s, d_e)) = next_open_tag_ci(doc, "<div", pos) {
        pos = d_e;
        if !has_class(&doc[d_s..d_e], TABLE_WRAPPER_CLASS) {
            continue;
        }
        table = slice_between_ci(&doc[d_s..], "<table", "</table>");
        break;
    }
    let table = table.ok_or(ExtractError::TableNotFound)?;

    match extract_cards(table) {
        Ok(cards) => {
            logd!("Cards: {} cards from document in {:?}", cards.len(), t.elapsed());
            Ok(cards)
        }
        Err(e) => {
            loge!("Cards: extraction aborted: {e}");
            Err(e)
        }
    }
}

/// Row pass over a table's inner markup. Rows come out in table order;
/// short rows (headers, spacers) are skipped silently, anything else that
/// doesn't hold its expected shape aborts with the row number.
pub fn extract_cards(table: &str) -> Result<Vec<Card>, ExtractError> {
    let mut cards: Vec<Card> = Vec::new();
    let mut pos = 0usize;
    let mut row = 0usize;

    while let Some((tr_s, tr_e)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let tr = &table[tr_s..tr_e];
        pos = tr_e;
        row += 1;

        if let Some(card) = card_from_row(tr, row, &cards)? {
            cards.push(card);
        }
    }
    Ok(cards)
}

/// One row into one record, or None for non-data rows.
///
/// Cell layout of the source table: 1 = set number (the id), 2 = linked
/// name, 3 = rarity, 5 = type image, 7 = stage, 9 = the marker cell
/// holding ability/attack/retreat markup.
fn card_from_row(tr: &str, row: usize, cards: &[Card]) -> Result<Option<Card>, ExtractError> {
    // <td> cells, inner markup only
    let mut cells: Vec<String> = Vec::new();
    let mut td_pos = 0usize;
    while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
        cells.push(inner_after_open_tag(&tr[td_s..td_e]));
        td_pos = td_e;
    }

    // Headers and spacers don't carry the full cell complement.
    if cells.len() < MIN_DATA_CELLS {
        return Ok(None);
    }

    let id = strip_tags(normalize_entities(&cells[1])).replace(' ', "-");
    let name = link_text(&cells[2]).ok_or(ExtractError::MissingNameLink { row })?;
    let rarity = strip_tags(normalize_entities(&cells[3]));
    let kind = first_img_label(&cells[5]).unwrap_or_default();
    let stage = strip_tags(normalize_entities(&cells[7]));

    let marker = tokenize(&cells[9]);
    let is_trainer = TRAINER_TYPES.contains(&kind.as_str());

    let ability = if is_trainer {
        None
    } else {
        parse_ability(&marker, row)?
    };

    // Chain resolution runs for every row: a trainer row keeps no link of
    // its own but still anchors the chain for its successor, and still
    // trips the no-predecessor precondition.
    let requires = resolve_requires(&name, &stage, cards, row)?;

    let card = if is_trainer {
        Card::Trainer(TrainerCard {
            id,
            name,
            rarity,
            kind,
            ability: strip_tags(normalize_entities(&cells[9])),
        })
    } else {
        Card::Pokemon(PokemonCard {
            id,
            name,
            rarity,
            kind,
            stage,
            requires,
            retreat_cost: retreat_cost(&marker),
            ability,
            attacks: parse_attacks(&marker),
        })
    };
    Ok(Some(card))
}

/* ---------- per-field helpers ---------- */

fn link_text(cell: &str) -> Option<String> {
    let (a_s, a_e) = next_tag_block_ci(cell, "<a", "</a>", 0)?;
    Some(strip_tags(normalize_entities(&inner_after_open_tag(
        &cell[a_s..a_e],
    ))))
}

/// Label of the first image in a cell, source prefix stripped.
fn first_img_label(cell: &str) -> Option<String> {
    let (i_s, i_e) = next_open_tag_ci(cell, "<img", 0)?;
    let alt = attr_value(&cell[i_s..i_e], "alt").unwrap_or_default();
    let label = normalize_entities(&alt).replacen(TYPE_LABEL_PREFIX, "", 1);
    Some(s!(label.trim()))
}

/// Retreat cost from the first image under an aligned block: the source
/// renders the retreat row as a single image one energy-width (20px) per
/// energy. Absent width means unmeasurable, so absent cost.
fn retreat_cost(nodes: &[Node]) -> Option<u32> {
    first_aligned_img_width(nodes, false)
        .flatten()
        .map(|w| w / RETREAT_WIDTH_UNIT)
}

/// Declared width of the first image inside (any depth of) an aligned
/// block. Outer Option: no such image; inner: image had no width.
fn first_aligned_img_width(nodes: &[Node], inside: bool) -> Option<Option<u32>> {
    for n in nodes {
        match n {
            Node::Img { width, .. } if inside => return Some(*width),
            Node::Block { aligned, nodes } => {
                if let Some(hit) = first_aligned_img_width(nodes, inside || *aligned) {
                    return Some(hit);
                }
            }
            _ => {}
        }
    }
    None
}

/// Ability sub-record. A cell without the marker span simply has no
/// ability; a marker with nothing after it means the cell shape changed
/// under us and the run aborts.
fn parse_ability(nodes: &[Node], row: usize) -> Result<Option<Ability>, ExtractError> {
    let Some(ix) = nodes.iter().position(|n| matches!(n, Node::Marker(_))) else {
        return Ok(None);
    };
    let title_node = nodes
        .get(ix + 1)
        .ok_or(ExtractError::DanglingAbilityMarker { row })?;
    let title = s!(title_node.text().trim());

    // Everything after the title up to the first block-level node is
    // effect text, fragments trimmed and joined with no separator.
    let mut effect = s!();
    for n in &nodes[ix + 2..] {
        if matches!(n, Node::Block { .. }) {
            break;
        }
        effect.push_str(n.text().trim());
    }
    Ok(Some(Ability { title, effect }))
}

/// Attack sub-records, in cell order. Each aligned block anchored by a
/// bold label is one attack, except the retreat row.
fn parse_attacks(nodes: &[Node]) -> Vec<Attack> {
    let mut attacks = Vec::new();
    for (i, n) in nodes.iter().enumerate() {
        let Node::Block { aligned: true, nodes: block } = n else {
            continue;
        };
        let Some(name) = bold_label(block) else { continue };
        if name == RETREAT_LABEL {
            continue;
        }

        // Damage is the first digit run right after the anchor block.
        let damage = nodes
            .get(i + 1)
            .and_then(|next| first_digit_run(next.text().trim()))
            .unwrap_or(0);

        attacks.push(Attack {
            name,
            cost: parse_cost(block),
            damage,
            effect: attack_effect(&nodes[i + 1..]),
        });
    }
    attacks
}

fn bold_label(nodes: &[Node]) -> Option<String> {
    nodes.iter().find_map(|n| match n {
        Node::Inline { tag, text } if tag == "b" => Some(s!(text.trim())),
        Node::Block { nodes, .. } => bold_label(nodes),
        _ => None,
    })
}

/// Energy labels to cost tokens: "Grass" is one Grass, "Colorless 2" is
/// two Colorless. A count that doesn't parse falls back to 1.
fn parse_cost(block: &[Node]) -> Vec<String> {
    let mut cost = Vec::new();
    collect_cost(block, &mut cost);
    cost
}

fn collect_cost(nodes: &[Node], out: &mut Vec<String>) {
    for n in nodes {
        match n {
            Node::Img { label, .. } => {
                let label = label.replacen(TYPE_LABEL_PREFIX, "", 1);
                let label = label.trim();
                let mut words = label.split_whitespace();
                let ty = words.next().unwrap_or("");
                let count = words.next().map_or(1, |w| w.parse::<usize>().unwrap_or(1));
                for _ in 0..count {
                    out.push(s!(ty));
                }
            }
            Node::Block { nodes, .. } => collect_cost(nodes, out),
            _ => {}
        }
    }
}

/// Effect text: bare text runs after the anchor, up to the next aligned
/// block. Purely numeric fragments are the damage figure and stay out.
fn attack_effect(rest: &[Node]) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for n in rest {
        if matches!(n, Node::Block { aligned: true, .. }) {
            break;
        }
        if let Node::Text(t) = n {
            let t = t.trim();
            if !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()) {
                parts.push(s!(t));
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn first_digit_run(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Evolution-chain back reference. Non-Basic rows point at the card
/// directly above them in the table; "ex" variants and reprinted names
/// instead copy the link of the first earlier card sharing their base
/// name, so a variant printed away from its line still chains correctly.
fn resolve_requires(
    name: &str,
    stage: &str,
    cards: &[Card],
    row: usize,
) -> Result<Option<String>, ExtractError> {
    if stage == BASIC_STAGE {
        return Ok(None);
    }
    let last = cards.last().ok_or_else(|| ExtractError::NoPrecedingCard {
        row,
        stage: s!(stage),
    })?;
    let mut requires = Some(s!(last.id()));

    // Substring match, not word-boundary: a base name that happens to
    // contain "ex" trips this too, same as the source feed.
    let seen_before = cards.iter().any(|c| c.name() == name);
    if name.contains("ex") || seen_before {
        let base = name.strip_suffix(" ex").unwrap_or(name);
        if let Some(first) = cards.iter().find(|c| c.name() == base) {
            requires = first.requires().map(String::from);
        }
    }
    Ok(requires)
}
