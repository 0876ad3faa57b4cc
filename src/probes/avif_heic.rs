//! AVIF/HEIC: ISO-BMFF box walk.
//!
//! The "ftyp" box's brand set discriminates avif from heic. Inside "meta",
//! the property container ("iprp" → "ipco") holds "ispe" (spatial extents)
//! and "irot" (rotation in 90-degree steps) boxes, which are correlated
//! with the primary item ("pitm") through the item-to-property association
//! table ("ipma") — so a thumbnail's or alpha plane's ispe is never picked
//! over the primary image's. Every box length is attacker-controlled and is
//! range-checked before use; a bad claim rejects the file.

use std::collections::{HashMap, HashSet};
use std::io;

use super::Parsed;
use crate::info::ImageSize;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

const BRANDS: [&[u8]; 8] = [
    b"avif", b"avis", b"mif1", b"msf1", b"heic", b"heix", b"hevc", b"hevx",
];

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 4 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 4)?;
    let ftyp_length = u64::from(buffer.read_u32_be(0));
    if length < ftyp_length + 12 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, (ftyp_length + 12) as usize)?;
    if !buffer.matches(4, b"ftyp") || !buffer.matches_any(8, &BRANDS) {
        return Ok(None);
    }
    if ftyp_length < 16 || (ftyp_length - 16) % 4 != 0 {
        return Ok(None);
    }

    let compatible_count = ((ftyp_length - 16) / 4) as usize;
    let mut compatible: HashSet<&[u8]> = HashSet::with_capacity(compatible_count);
    for i in 0..compatible_count {
        compatible.insert(buffer.bytes(16 + i * 4, 4));
    }

    let format = if compatible.contains(&b"avif"[..]) || buffer.matches(8, b"avif") {
        ImageFormat::Avif
    } else if compatible.contains(&b"heic"[..]) || buffer.matches(8, b"heic") {
        ImageFormat::Heic
    } else {
        return Ok(None);
    };

    let ftyp_end = ftyp_length as usize;
    if !buffer.matches(ftyp_end + 4, b"meta") {
        return Ok(None);
    }
    let meta_length = u64::from(buffer.read_u32_be(ftyp_end));
    if length < ftyp_length + 12 + meta_length {
        return Ok(None);
    }

    // window over the meta box body (version/flags skipped)
    let buffer = ri.read_buffer(ftyp_length + 12, meta_length as usize)?;
    let end = meta_length as usize;

    let mut pitm_id: u16 = 0;
    let mut ipma: HashMap<u16, HashSet<u8>> = HashMap::new();
    let mut ispe_by_index: HashMap<u8, ImageSize> = HashMap::new();
    let mut irot_by_index: HashMap<u8, u8> = HashMap::new();
    let mut ipco_start = 0usize;
    let mut ipco_end = 0usize;
    let mut ipco_child_index: u8 = 1;

    let mut offset = 0usize;
    while offset < end {
        if offset + 8 > end {
            break;
        }
        let box_size = buffer.read_u32_be(offset) as usize;
        if box_size < 8 || offset + box_size > end {
            break;
        }

        if buffer.matches(offset + 4, b"pitm") {
            if box_size < 14 {
                return Ok(None);
            }
            pitm_id = buffer.read_u16_be(offset + 12);
            offset += box_size;
        } else if buffer.matches(offset + 4, b"ipma") {
            if box_size < 16 {
                return Ok(None);
            }
            let box_end = offset + box_size;
            let entry_count = buffer.read_u16_be(offset + 14);
            let mut cursor = offset + 16;
            for _ in 0..entry_count {
                if cursor + 3 > box_end {
                    return Ok(None);
                }
                let item_id = buffer.read_u16_be(cursor);
                let index_count = usize::from(buffer.read_u8(cursor + 2));
                cursor += 3;
                if cursor + index_count > box_end {
                    return Ok(None);
                }
                let mut indices = HashSet::with_capacity(index_count);
                for j in 0..index_count {
                    indices.insert(buffer.read_u8(cursor + j) & 0x0F);
                }
                cursor += index_count;
                ipma.insert(item_id, indices);
            }
            offset += box_size;
        } else if buffer.matches(offset + 4, b"iprp") {
            // container: descend
            offset += 8;
        } else if buffer.matches(offset + 4, b"ipco") {
            ipco_start = offset;
            ipco_end = offset + box_size;
            offset += 8;
        } else if buffer.matches(offset + 4, b"ispe") {
            if box_size < 20 {
                return Ok(None);
            }
            let width = i64::from(buffer.read_u32_be(offset + 12));
            let height = i64::from(buffer.read_u32_be(offset + 16));
            ispe_by_index.insert(ipco_child_index, ImageSize::new(width, height));
            ipco_child_index = ipco_child_index.wrapping_add(1);
            offset += box_size;
        } else if buffer.matches(offset + 4, b"irot") {
            if box_size < 9 {
                return Ok(None);
            }
            irot_by_index.insert(ipco_child_index, buffer.read_u8(offset + 8));
            ipco_child_index = ipco_child_index.wrapping_add(1);
            offset += box_size;
        } else {
            // any other property inside ipco still occupies an index slot
            if offset > ipco_start && offset < ipco_end {
                ipco_child_index = ipco_child_index.wrapping_add(1);
            }
            offset += box_size;
        }
    }

    let Some(primary_indices) = ipma.get(&pitm_id) else {
        return Ok(None);
    };
    let rotation = irot_by_index
        .iter()
        .find(|(index, _)| primary_indices.contains(*index))
        .map(|(_, &irot)| irot)
        .unwrap_or(0);

    for (index, &size) in &ispe_by_index {
        if primary_indices.contains(index) {
            let mut size = size;
            if rotation == 1 || rotation == 3 {
                std::mem::swap(&mut size.width, &mut size.height);
            }
            return Ok(Some(Parsed {
                format,
                size,
                entry_sizes: Vec::new(),
            }));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    fn full_box(box_type: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(12 + body.len() as u32).to_be_bytes());
        data.extend_from_slice(box_type);
        data.extend_from_slice(&0u32.to_be_bytes()); // version/flags
        data.extend_from_slice(body);
        data
    }

    fn plain_box(box_type: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
        data.extend_from_slice(box_type);
        data.extend_from_slice(body);
        data
    }

    fn ispe(width: u32, height: u32) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&width.to_be_bytes());
        body.extend_from_slice(&height.to_be_bytes());
        full_box(b"ispe", &body)
    }

    fn irot(rotation: u8) -> Vec<u8> {
        plain_box(b"irot", &[rotation])
    }

    /// ipma with one entry: item 1 associated with the given property
    /// indices.
    fn ipma(indices: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&1u32.to_be_bytes()); // entry count
        body.extend_from_slice(&1u16.to_be_bytes()); // item id
        body.push(indices.len() as u8);
        body.extend_from_slice(indices);
        full_box(b"ipma", &body)
    }

    fn pitm(item_id: u16) -> Vec<u8> {
        full_box(b"pitm", &item_id.to_be_bytes())
    }

    /// Assemble ftyp + meta(properties) with the given ipco children.
    fn container(major: &[u8; 4], compatible: &[&[u8; 4]], meta_children: &[Vec<u8>]) -> Vec<u8> {
        let mut ftyp_body = Vec::new();
        ftyp_body.extend_from_slice(major);
        ftyp_body.extend_from_slice(&0u32.to_be_bytes());
        for brand in compatible {
            ftyp_body.extend_from_slice(*brand);
        }

        let mut meta_body = Vec::new();
        for child in meta_children {
            meta_body.extend_from_slice(child);
        }

        let mut data = plain_box(b"ftyp", &ftyp_body);
        data.extend_from_slice(&full_box(b"meta", &meta_body));
        // image data follows the metadata in any real file
        data.extend_from_slice(&plain_box(b"mdat", &[0u8; 16]));
        data
    }

    fn iprp_with(ipco_children: &[Vec<u8>]) -> Vec<u8> {
        let mut ipco_body = Vec::new();
        for child in ipco_children {
            ipco_body.extend_from_slice(child);
        }
        let ipco = plain_box(b"ipco", &ipco_body);
        plain_box(b"iprp", &ipco)
    }

    #[test]
    fn avif_brand_reads_primary_ispe() {
        let data = container(
            b"avif",
            &[b"avif", b"mif1"],
            &[
                pitm(1),
                ipma(&[1]),
                iprp_with(&[ispe(123, 456)]),
            ],
        );
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Avif);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn heic_brand_discriminates() {
        let data = container(
            b"heic",
            &[b"mif1", b"heic"],
            &[pitm(1), ipma(&[1]), iprp_with(&[ispe(122, 456)])],
        );
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Heic);
    }

    #[test]
    fn brand_without_avif_or_heic_rejects() {
        let data = container(
            b"mif1",
            &[b"mif1"],
            &[pitm(1), ipma(&[1]), iprp_with(&[ispe(1, 1)])],
        );
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn primary_item_selects_among_multiple_ispe() {
        // property 1: thumbnail extents; property 2: the primary image.
        // pitm=1 is associated with index 2 only.
        let data = container(
            b"avif",
            &[b"avif"],
            &[
                pitm(1),
                ipma(&[2]),
                iprp_with(&[ispe(64, 64), ispe(800, 533)]),
            ],
        );
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 800);
        assert_eq!(parsed.size.height, 533);
    }

    #[test]
    fn rotation_90_swaps_dimensions() {
        let data = container(
            b"avif",
            &[b"avif"],
            &[
                pitm(1),
                ipma(&[1, 2]),
                iprp_with(&[ispe(123, 456), irot(1)]),
            ],
        );
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 456);
        assert_eq!(parsed.size.height, 123);
    }

    #[test]
    fn rotation_180_does_not_swap() {
        let data = container(
            b"avif",
            &[b"avif"],
            &[
                pitm(1),
                ipma(&[1, 2]),
                iprp_with(&[ispe(123, 456), irot(2)]),
            ],
        );
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn rejects_oversized_ftyp_length_claim() {
        let mut data = container(b"avif", &[b"avif"], &[pitm(1), ipma(&[1]), iprp_with(&[ispe(1, 1)])]);
        data[0..4].copy_from_slice(&0xFFFF_FF00u32.to_be_bytes());
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_unassociated_primary_item() {
        // ipma describes item 9, but pitm points at item 1
        let data = container(
            b"avif",
            &[b"avif"],
            &[pitm(1), {
                let mut body = Vec::new();
                body.extend_from_slice(&1u32.to_be_bytes());
                body.extend_from_slice(&9u16.to_be_bytes());
                body.push(1);
                body.push(1);
                full_box(b"ipma", &body)
            }, iprp_with(&[ispe(1, 1)])],
        );
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_missing_meta_box() {
        let mut ftyp_body = Vec::new();
        ftyp_body.extend_from_slice(b"avif");
        ftyp_body.extend_from_slice(&0u32.to_be_bytes());
        ftyp_body.extend_from_slice(b"avif");
        let mut data = plain_box(b"ftyp", &ftyp_body);
        data.extend_from_slice(&plain_box(b"mdat", &[0u8; 8]));
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_truncated_meta_claim() {
        let mut data = container(
            b"avif",
            &[b"avif"],
            &[pitm(1), ipma(&[1]), iprp_with(&[ispe(1, 1)])],
        );
        // inflate the meta box length past end of file
        let ftyp_len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        data[ftyp_len..ftyp_len + 4].copy_from_slice(&0x0010_0000u32.to_be_bytes());
        assert!(run(probe, &data).is_none());
    }
}
