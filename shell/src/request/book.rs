use application::transfer::{
    CreateBookDto, DeleteBookDto, GetBookByTitleDto, GetBookDto, SearchBookDto, UpdateBookDto,
};

use crate::controller::Intake;

/// Validated answers of the add-book prompts.
#[derive(Debug)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub pages: i64,
    pub year_published: i64,
    pub status: i64,
    pub category: String,
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    pub id: i64,
    pub book: CreateBookRequest,
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetBookByTitleRequest {
    title: String,
}

impl GetBookByTitleRequest {
    pub fn new(title: String) -> Self {
        Self { title }
    }
}

#[derive(Debug)]
pub struct SearchBookRequest {
    keyword: String,
    available_only: bool,
}

impl SearchBookRequest {
    pub fn any(keyword: String) -> Self {
        Self {
            keyword,
            available_only: false,
        }
    }

    pub fn available(keyword: String) -> Self {
        Self {
            keyword,
            available_only: true,
        }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            pages: clamp_i32(input.pages),
            year_published: clamp_i32(input.year_published),
            status: clamp_i32(input.status),
            category: input.category,
        }
    }
}

impl Intake<UpdateBookRequest> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: UpdateBookRequest) -> Self::To {
        let CreateBookDto {
            title,
            author,
            pages,
            year_published,
            status,
            category,
        } = <Self as Intake<CreateBookRequest>>::emit(self, input.book);
        UpdateBookDto {
            id: input.id,
            title,
            author,
            pages,
            year_published,
            status,
            category,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<GetBookByTitleRequest> for BookTransformer {
    type To = GetBookByTitleDto;
    fn emit(&self, input: GetBookByTitleRequest) -> Self::To {
        GetBookByTitleDto { title: input.title }
    }
}

impl Intake<SearchBookRequest> for BookTransformer {
    type To = SearchBookDto;
    fn emit(&self, input: SearchBookRequest) -> Self::To {
        SearchBookDto {
            keyword: input.keyword,
            available_only: input.available_only,
        }
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod test {
    use crate::controller::Intake;
    use crate::request::{BookTransformer, CreateBookRequest, UpdateBookRequest};

    #[test]
    fn update_carries_the_id_and_every_field() {
        let dto = BookTransformer.emit(UpdateBookRequest {
            id: 5,
            book: CreateBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                pages: 412,
                year_published: 1965,
                status: 2,
                category: "Science Fiction".to_string(),
            },
        });
        assert_eq!(dto.id, 5);
        assert_eq!(dto.pages, 412);
        assert_eq!(dto.year_published, 1965);
        assert_eq!(dto.status, 2);
        assert_eq!(dto.category, "Science Fiction");
    }
}
