//! Turns one job-detail page into a [`JobRecord`].
//!
//! The markup is semi-structured: the interesting blocks are `ul` elements
//! tagged with a `data-test` attribute, plus a handful of class-marked
//! anchors and the position-name heading. Extraction is best effort and
//! never fails; whatever the page does not carry simply stays absent.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::classifier::{classify, Category};

const BENEFIT_LIST: &str = "sections-benefit-list";
const OPEN_DICTIONARY: &str = "aggregate-open-dictionary-model";

/// One scraped job offer. List fields hold a non-empty sequence or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobRecord {
    pub url: String,
    pub title: Option<String>,
    pub work_location: Option<String>,
    pub validity: Option<String>,
    pub contract_type: Option<String>,
    pub employment_type: Option<String>,
    pub position: Option<String>,
    pub work_arrangement: Option<String>,
    pub start: Option<String>,
    pub recruitment_method: Option<String>,
    pub additional_info: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub application_link: Option<String>,
}

pub struct DetailExtractor {
    bullet_lists: Selector,
    tagged_lists: Selector,
    list_items: Selector,
    apply_links: Selector,
    title: Selector,
}

impl DetailExtractor {
    pub fn new() -> Self {
        DetailExtractor {
            bullet_lists: Selector::parse(r#"ul[data-test="aggregate-bullet-model"]"#).unwrap(),
            tagged_lists: Selector::parse(
                r#"ul[data-test="sections-benefit-list"], ul[data-test="aggregate-open-dictionary-model"]"#,
            )
            .unwrap(),
            list_items: Selector::parse("li").unwrap(),
            apply_links: Selector::parse("a.b14qiyz3").unwrap(),
            title: Selector::parse(r#"h1[data-test="text-positionName"]"#).unwrap(),
        }
    }

    /// Parses a fetched detail page. `url` is recorded verbatim on the record.
    pub fn extract(&self, url: &str, html: &str) -> JobRecord {
        let document = Html::parse_document(html);

        // First bullet block lists responsibilities, second lists
        // requirements. Either may be missing.
        let mut bullet_blocks = document.select(&self.bullet_lists);
        let responsibilities = bullet_blocks.next().map(|list| self.item_texts(list));
        let requirements = bullet_blocks.next().map(|list| self.item_texts(list));

        // Benefit lists and the open technology dictionary share one walk so
        // their items keep document order.
        let mut benefit_items = Vec::new();
        let mut technologies = Vec::new();
        for list in document.select(&self.tagged_lists) {
            let items = self.item_texts(list);
            match list.value().attr("data-test") {
                Some(BENEFIT_LIST) => benefit_items.extend(items),
                Some(OPEN_DICTIONARY) => technologies.extend(items),
                _ => {}
            }
        }

        let application_link = document
            .select(&self.apply_links)
            .filter_map(|anchor| anchor.value().attr("href"))
            .next()
            .map(str::to_string);

        let title = document
            .select(&self.title)
            .next()
            .map(|heading| heading.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty());

        let mut record = JobRecord {
            url: url.to_string(),
            title,
            application_link,
            ..JobRecord::default()
        };
        apply_benefit_items(&mut record, benefit_items);
        record.technologies = non_empty(technologies);
        record.responsibilities = responsibilities.and_then(non_empty);
        record.requirements = requirements.and_then(non_empty);
        record
    }

    fn item_texts(&self, list: ElementRef<'_>) -> Vec<String> {
        list.select(&self.list_items)
            .map(|item| item.text().collect::<String>().trim().to_string())
            .collect()
    }
}

/// Files every benefit item under its category. Single-valued fields keep
/// the first matching item; everything unmatched lands in `additional_info`.
fn apply_benefit_items(record: &mut JobRecord, items: Vec<String>) {
    let mut additional_info = Vec::new();
    for item in items {
        let slot = match classify(&item) {
            Category::WorkLocation => &mut record.work_location,
            Category::Validity => &mut record.validity,
            Category::ContractType => &mut record.contract_type,
            Category::EmploymentType => &mut record.employment_type,
            Category::Position => &mut record.position,
            Category::WorkArrangement => &mut record.work_arrangement,
            Category::Start => &mut record.start,
            Category::RecruitmentMethod => &mut record.recruitment_method,
            Category::AdditionalInfo => {
                additional_info.push(item);
                continue;
            }
        };
        if slot.is_none() {
            *slot = Some(item);
        }
    }
    record.additional_info = non_empty(additional_info);
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
