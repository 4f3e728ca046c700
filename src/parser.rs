use crate::{
    utils::{is_noisy, visible_text},
    FaqRecord, ParseError,
};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub const DEFAULT_CONTAINER: &str = "#faq";
pub const DEFAULT_QUESTION: &str =
    r#"h1, h2, h3, h4, h5, h6, dt, summary, .question, [itemprop="name"]"#;
pub const DEFAULT_ANSWER: &str =
    r#"p, dd, ul, ol, pre, blockquote, table, .answer, [itemprop="text"]"#;

/// CSS selectors naming the parts of an FAQ page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqSelectors {
    pub container: String,
    pub question: String,
    pub answer: String,
}

impl Default for FaqSelectors {
    fn default() -> Self {
        FaqSelectors {
            container: DEFAULT_CONTAINER.to_string(),
            question: DEFAULT_QUESTION.to_string(),
            answer: DEFAULT_ANSWER.to_string(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Extracts FAQ records from a page.
///
/// Inside the container, each child element is either a group holding one
/// question and its answer, or (flat layout, as in `<dl>` lists) a question
/// element followed by answer siblings. Wrappers holding several questions
/// are walked the same way. Records come out in document order.
#[derive(Debug, Clone)]
pub struct FaqParser {
    container_src: String,
    container: Selector,
    question: Selector,
    answer: Selector,
}

impl FaqParser {
    pub fn new(selectors: &FaqSelectors) -> Result<FaqParser, ParseError> {
        Ok(FaqParser {
            container_src: selectors.container.clone(),
            container: compile(&selectors.container)?,
            question: compile(&selectors.question)?,
            answer: compile(&selectors.answer)?,
        })
    }

    pub fn parse(&self, html: &str) -> Result<Vec<FaqRecord>, ParseError> {
        if html.trim().is_empty() {
            return Ok(vec![]);
        }
        let doc = Html::parse_document(html);
        self.extract(&doc)
    }

    pub fn extract(&self, doc: &Html) -> Result<Vec<FaqRecord>, ParseError> {
        let container = doc
            .select(&self.container)
            .next()
            .ok_or_else(|| ParseError::ContainerMissing(self.container_src.clone()))?;

        let mut records = vec![];
        self.walk(container, &mut records);

        debug!(
            "Extracted {} records from `{}`",
            records.len(),
            self.container_src
        );
        Ok(records)
    }

    /// Walks the children of `parent`. A child holding several questions is
    /// walked as a container of its own.
    fn walk(&self, parent: ElementRef<'_>, records: &mut Vec<FaqRecord>) {
        let mut pending: Option<(String, Vec<String>)> = None;

        for child in parent.children().filter_map(ElementRef::wrap) {
            if is_noisy(&child) {
                continue;
            }

            if self.question.matches(&child) {
                self.flush(&mut pending, records);
                pending = Some((visible_text(child), vec![]));
                continue;
            }

            match child.select(&self.question).take(2).count() {
                0 => {
                    if let Some((_, answer)) = pending.as_mut() {
                        if self.answer.matches(&child) {
                            answer.push(visible_text(child));
                        }
                    }
                }
                1 => {
                    self.flush(&mut pending, records);
                    if let Some(record) = self.extract_group(child) {
                        records.push(record);
                    }
                }
                _ => {
                    self.flush(&mut pending, records);
                    self.walk(child, records);
                }
            }
        }
        self.flush(&mut pending, records);
    }

    fn flush(&self, pending: &mut Option<(String, Vec<String>)>, records: &mut Vec<FaqRecord>) {
        if let Some((question, answer)) = pending.take() {
            push_valid(records, FaqRecord::new(question, join_parts(answer)));
        }
    }

    fn extract_group(&self, group: ElementRef<'_>) -> Option<FaqRecord> {
        let question = group.select(&self.question).next()?;

        let answer = group
            .select(&self.answer)
            .filter(|el| !is_within(el, &question))
            .filter(|el| !self.has_answer_ancestor(el, &group))
            .map(visible_text)
            .collect_vec();

        let record = FaqRecord::new(visible_text(question), join_parts(answer));
        if record.is_valid() {
            Some(record)
        } else {
            debug!("Skip group without question text");
            None
        }
    }

    fn has_answer_ancestor(&self, el: &ElementRef<'_>, group: &ElementRef<'_>) -> bool {
        el.ancestors()
            .take_while(|node| node.id() != group.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.answer.matches(&ancestor))
    }
}

fn is_within(el: &ElementRef<'_>, outer: &ElementRef<'_>) -> bool {
    el.id() == outer.id() || el.ancestors().any(|node| node.id() == outer.id())
}

fn join_parts(parts: Vec<String>) -> String {
    parts.into_iter().filter(|p| !p.is_empty()).join(" ")
}

fn push_valid(records: &mut Vec<FaqRecord>, record: FaqRecord) {
    if record.is_valid() {
        records.push(record);
    } else {
        debug!("Skip question without text");
    }
}
