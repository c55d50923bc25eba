pub mod category_dto;

pub use category_dto::{
    CategoryEntryDto, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
