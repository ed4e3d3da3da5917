//! scraper 위에 얹은 작은 탐색 헬퍼.
//!
//! 모든 헬퍼는 요소가 없으면 기본값 대신 `StructureError`를 반환합니다.

use fundamentus_core::{RawField, RawSection};
use scraper::{ElementRef, Html, Selector};

use super::schema::{
    BlockSchema, FieldShape, FieldSlot, Locator, DATA, DATA_TEXT, DATA_TITLE, DATA_TOOLTIP,
    DATA_VALUE, FRAME, TOOLTIP_ATTR, TOOLTIP_FALLBACK_ATTR,
};
use crate::error::StructureError;

/// 셀렉터를 파싱합니다.
pub(crate) fn css(selector: &'static str) -> Result<Selector, StructureError> {
    Selector::parse(selector).map_err(|e| StructureError::InvalidSelector {
        selector,
        reason: e.to_string(),
    })
}

/// 요소의 모든 하위 텍스트를 이어 붙입니다 (정리하지 않음).
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// `scope` 아래에서 셀렉터와 일치하는 N번째 요소.
pub(crate) fn nth<'a>(
    scope: ElementRef<'a>,
    selector: &'static str,
    position: usize,
    block: &'static str,
) -> Result<ElementRef<'a>, StructureError> {
    let sel = css(selector)?;
    scope
        .select(&sel)
        .nth(position)
        .ok_or(StructureError::MissingElement {
            block,
            selector,
            position,
        })
}

pub(crate) fn first<'a>(
    scope: ElementRef<'a>,
    selector: &'static str,
    block: &'static str,
) -> Result<ElementRef<'a>, StructureError> {
    nth(scope, selector, 0, block)
}

/// `scope` 아래에서 셀렉터와 일치하는 모든 요소.
pub(crate) fn all<'a>(
    scope: ElementRef<'a>,
    selector: &'static str,
) -> Result<Vec<ElementRef<'a>>, StructureError> {
    let sel = css(selector)?;
    Ok(scope.select(&sel).collect())
}

/// 툴팁 문자열.
///
/// `title` 속성이 없거나 비어 있으면 `data-original-title`을 사용합니다.
/// 둘 다 없으면 `MissingAttribute`입니다. 빈 `data-original-title`은 허용합니다.
pub(crate) fn tooltip(scope: ElementRef<'_>, block: &'static str) -> Result<String, StructureError> {
    let element = first(scope, DATA_TOOLTIP, block)?;

    match element.value().attr(TOOLTIP_ATTR) {
        Some(primary) if !primary.is_empty() => Ok(primary.to_string()),
        _ => element
            .value()
            .attr(TOOLTIP_FALLBACK_ATTR)
            .map(str::to_string)
            .ok_or(StructureError::MissingAttribute {
                block,
                attribute: TOOLTIP_FALLBACK_ATTR,
            }),
    }
}

/// 상세 페이지의 `div.frame` 블록들.
pub(crate) struct Frames<'a> {
    document: &'a Html,
    frames: Vec<ElementRef<'a>>,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(document: &'a Html) -> Result<Self, StructureError> {
        let sel = css(FRAME)?;
        Ok(Self {
            document,
            frames: document.select(&sel).collect(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    /// 블록을 찾습니다.
    pub(crate) fn locate(
        &self,
        locator: Locator,
        block: &'static str,
    ) -> Result<ElementRef<'a>, StructureError> {
        let found = match locator {
            Locator::Frame(index) => self.frames.get(index).copied(),
            Locator::Selector(selector) => {
                let sel = css(selector)?;
                self.document.select(&sel).next()
            }
        };

        found.ok_or(StructureError::MissingBlock { block })
    }
}

/// `div.data` 요소 하나를 원시 필드로 읽습니다.
pub(crate) fn read_field(
    data: ElementRef<'_>,
    shape: FieldShape,
    block: &'static str,
) -> Result<RawField, StructureError> {
    let value = text_of(first(data, DATA_VALUE, block)?);

    match shape {
        FieldShape::Titled => {
            let title = first(data, DATA_TITLE, block)?;
            Ok(RawField::new(text_of(title), tooltip(title, block)?, value))
        }
        FieldShape::Labeled => {
            let label = first(data, DATA_TEXT, block)?;
            Ok(RawField::new(text_of(label), tooltip(label, block)?, value))
        }
        FieldShape::LabeledWithoutTooltip => {
            let label = first(data, DATA_TEXT, block)?;
            Ok(RawField::without_tooltip(text_of(label), value))
        }
    }
}

/// 스키마의 위치 목록대로 `div.data` 요소들을 읽습니다.
pub(crate) fn read_slots(
    blocks: &[ElementRef<'_>],
    schema: &BlockSchema,
) -> Result<RawSection, StructureError> {
    read_positions(blocks, schema.fields, schema.shape, schema.name)
}

pub(crate) fn read_positions(
    blocks: &[ElementRef<'_>],
    slots: &[FieldSlot],
    shape: FieldShape,
    block: &'static str,
) -> Result<RawSection, StructureError> {
    slots
        .iter()
        .map(|slot| -> Result<(String, RawField), StructureError> {
            let data = blocks
                .get(slot.position)
                .copied()
                .ok_or(StructureError::MissingElement {
                    block,
                    selector: DATA,
                    position: slot.position,
                })?;
            Ok((slot.key.to_string(), read_field(data, shape, block)?))
        })
        .collect()
}
