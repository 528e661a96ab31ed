mod category_dto;

pub use category_dto::{
    CategoryNodeDto, CategoryOrderItemDto, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto, UpdateCategoryOrderDto,
};
