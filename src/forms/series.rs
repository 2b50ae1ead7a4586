use crate::api::{Series, SeriesDraft};

use super::{optional_date, required, EntityForm, FormError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesForm {
    pub title: String,
    pub author: String,
    pub publication_date: String,
    pub description: String,
    pub cover_image: String,
    pub publisher: String,
    pub isbn: String,
}

impl EntityForm for SeriesForm {
    type Record = Series;

    fn prefill(series: &Series) -> SeriesForm {
        SeriesForm {
            title: series.title.clone(),
            author: series.author.clone(),
            publication_date: series
                .publication_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            description: series.description.clone().unwrap_or_default(),
            cover_image: series.cover_image.clone().unwrap_or_default(),
            publisher: series.publisher.clone().unwrap_or_default(),
            isbn: series.isbn.clone().unwrap_or_default(),
        }
    }

    fn payload(&self) -> Result<SeriesDraft, FormError> {
        Ok(SeriesDraft {
            title: required(&self.title, "Title")?,
            author: required(&self.author, "Author")?,
            publication_date: optional_date(&self.publication_date, "Publication Date")?,
            description: self.description.clone(),
            cover_image: self.cover_image.clone(),
            publisher: self.publisher.clone(),
            isbn: self.isbn.clone(),
        })
    }

    fn fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![
            ("Title", &mut self.title),
            ("Author", &mut self.author),
            ("Publication Date", &mut self.publication_date),
            ("Description", &mut self.description),
            ("Cover Image URL", &mut self.cover_image),
            ("Publisher", &mut self.publisher),
            ("ISBN", &mut self.isbn),
        ]
    }
}
