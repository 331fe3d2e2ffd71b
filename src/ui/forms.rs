use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::catalog::ListingInput;
use crate::error::Result;
use crate::image::{decode_data_uri, describe_handle, resolve_image_input};
use crate::models::{Category, FacetCode, ListingRecord, Tech};

/// Fields of the listing form in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ListingField {
    #[default]
    Title,
    Description,
    Link,
    Image,
    Tech,
    Project,
    Price,
    Features,
    BuyLink,
}

impl ListingField {
    pub(crate) const ALL: [ListingField; 9] = [
        ListingField::Title,
        ListingField::Description,
        ListingField::Link,
        ListingField::Image,
        ListingField::Tech,
        ListingField::Project,
        ListingField::Price,
        ListingField::Features,
        ListingField::BuyLink,
    ];

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    /// Row offset of this field inside the form body.
    pub(crate) fn row(self) -> u16 {
        self.index() as u16
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ListingField::Title => "Title *",
            ListingField::Description => "Description",
            ListingField::Link => "Link *",
            ListingField::Image => "Image *",
            ListingField::Tech => "Tech",
            ListingField::Project => "Category",
            ListingField::Price => "Price",
            ListingField::Features => "Features",
            ListingField::BuyLink => "Buy Link",
        }
    }

    pub(crate) fn is_choice(self) -> bool {
        matches!(self, ListingField::Tech | ListingField::Project)
    }

    fn placeholder(self) -> &'static str {
        match self {
            ListingField::Title | ListingField::Link => "<required>",
            ListingField::Image => "<path to image file, URL or site path>",
            ListingField::Tech => "Select tech",
            ListingField::Project => "Select category",
            ListingField::Price => "₹99/-",
            ListingField::Features => "Life Time Access, Installation Video",
            ListingField::Description | ListingField::BuyLink => "<optional>",
        }
    }

    /// Width of the `Label: ` prefix in terminal cells.
    pub(crate) fn prefix_len(self) -> u16 {
        self.label().chars().count() as u16 + 2
    }
}

/// Step through `None` and every known value, wrapping at both ends. An
/// unknown current value restarts from the first known one.
pub(crate) fn cycle_facet<T>(current: Option<&T>, forward: bool) -> Option<T>
where
    T: FacetCode + PartialEq + Clone,
{
    let mut options: Vec<Option<T>> = vec![None];
    options.extend(T::known().into_iter().map(Some));

    let position = match current {
        None => Some(0),
        Some(value) => options
            .iter()
            .position(|option| option.as_ref() == Some(value)),
    };

    let len = options.len();
    let next = match (position, forward) {
        (Some(idx), true) => (idx + 1) % len,
        (Some(idx), false) => (idx + len - 1) % len,
        (None, _) => 1,
    };
    options.swap_remove(next)
}

/// State behind the add/edit modal.
#[derive(Default, Clone)]
pub(crate) struct ListingForm {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) link: String,
    /// Text typed into the image field.
    pub(crate) image: String,
    /// Embedded image carried over from the record being edited. Used when
    /// the image field is left blank.
    pub(crate) existing_image: Option<String>,
    pub(crate) tech: Option<Tech>,
    pub(crate) project: Option<Category>,
    pub(crate) price: String,
    pub(crate) features: String,
    pub(crate) buy_link: String,
    pub(crate) active: ListingField,
    pub(crate) error: Option<String>,
}

impl ListingForm {
    /// Populate the form from an existing record when editing. Data URIs are
    /// kept aside instead of being dumped into the text field.
    pub(crate) fn from_record(record: &ListingRecord) -> Self {
        let input = ListingInput::from_record(record);
        let (image, existing_image) = if decode_data_uri(&input.image).is_some() {
            (String::new(), Some(input.image))
        } else {
            (input.image, None)
        };

        Self {
            title: input.title,
            description: input.description,
            link: input.link,
            image,
            existing_image,
            tech: input.tech,
            project: input.project,
            price: input.price,
            features: input.features,
            buy_link: input.buy_link,
            active: ListingField::Title,
            error: None,
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    fn text_mut(&mut self, field: ListingField) -> Option<&mut String> {
        match field {
            ListingField::Title => Some(&mut self.title),
            ListingField::Description => Some(&mut self.description),
            ListingField::Link => Some(&mut self.link),
            ListingField::Image => Some(&mut self.image),
            ListingField::Price => Some(&mut self.price),
            ListingField::Features => Some(&mut self.features),
            ListingField::BuyLink => Some(&mut self.buy_link),
            ListingField::Tech | ListingField::Project => None,
        }
    }

    fn text(&self, field: ListingField) -> Option<&str> {
        match field {
            ListingField::Title => Some(&self.title),
            ListingField::Description => Some(&self.description),
            ListingField::Link => Some(&self.link),
            ListingField::Image => Some(&self.image),
            ListingField::Price => Some(&self.price),
            ListingField::Features => Some(&self.features),
            ListingField::BuyLink => Some(&self.buy_link),
            ListingField::Tech | ListingField::Project => None,
        }
    }

    /// Insert a character into the active field. Space cycles choice fields.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.active.is_choice() {
            return ch == ' ' && self.cycle_choice(true);
        }
        match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Remove the last character of the active field. On an empty image
    /// field this drops the carried-over embedded image.
    pub(crate) fn backspace(&mut self) {
        if self.active == ListingField::Image && self.image.is_empty() {
            self.existing_image = None;
            return;
        }
        if let Some(value) = self.text_mut(self.active) {
            value.pop();
        }
    }

    /// Move a choice field to its next or previous option.
    pub(crate) fn cycle_choice(&mut self, forward: bool) -> bool {
        match self.active {
            ListingField::Tech => {
                self.tech = cycle_facet(self.tech.as_ref(), forward);
                true
            }
            ListingField::Project => {
                self.project = cycle_facet(self.project.as_ref(), forward);
                true
            }
            _ => false,
        }
    }

    /// Resolve the image and collect the values the editor validates.
    pub(crate) fn to_input(&self) -> Result<ListingInput> {
        let image = if self.image.trim().is_empty() {
            self.existing_image.clone().unwrap_or_default()
        } else {
            resolve_image_input(&self.image)?
        };

        Ok(ListingInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image,
            link: self.link.trim().to_string(),
            tech: self.tech.clone(),
            project: self.project.clone(),
            price: self.price.trim().to_string(),
            features: self.features.clone(),
            buy_link: self.buy_link.trim().to_string(),
        })
    }

    /// Render one form row.
    pub(crate) fn build_line(&self, field: ListingField) -> Line<'static> {
        let is_active = self.active == field;

        let (display, is_empty) = match field {
            ListingField::Tech => choice_display(self.tech.as_ref(), field),
            ListingField::Project => choice_display(self.project.as_ref(), field),
            ListingField::Image if self.image.is_empty() => match &self.existing_image {
                Some(handle) => (format!("<embedded {}>", describe_handle(handle)), false),
                None => (field.placeholder().to_string(), true),
            },
            _ => {
                let value = self.text(field).unwrap_or_default();
                if value.is_empty() {
                    (field.placeholder().to_string(), true)
                } else {
                    (value.to_string(), false)
                }
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Cursor cell for the active text field inside the form body `inner`,
    /// kept on the last column when the value is wider than the popup.
    pub(crate) fn cursor_position(&self, inner: Rect) -> Option<Position> {
        if self.active.is_choice() || inner.width == 0 {
            return None;
        }
        let value_len = u16::try_from(self.value_len(self.active)).unwrap_or(u16::MAX);
        let x = inner
            .x
            .saturating_add(self.active.prefix_len())
            .saturating_add(value_len)
            .min(inner.right().saturating_sub(1));
        let y = inner.y.saturating_add(self.active.row());
        Some(Position::new(x, y))
    }

    /// Character length of the requested text field; zero for choices.
    pub(crate) fn value_len(&self, field: ListingField) -> usize {
        self.text(field)
            .map(|value| value.chars().count())
            .unwrap_or(0)
    }
}

fn choice_display<T: FacetCode>(value: Option<&T>, field: ListingField) -> (String, bool) {
    match value {
        Some(value) => (format!("< {} >", value.label()), false),
        None => (format!("< {} >", field.placeholder()), true),
    }
}

/// Listing awaiting delete confirmation.
#[derive(Clone)]
pub(crate) struct ConfirmListingDelete {
    pub(crate) id: String,
    pub(crate) title: String,
}

impl ConfirmListingDelete {
    pub(crate) fn from(record: &ListingRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
        }
    }
}
