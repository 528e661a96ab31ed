mod footer_content_dto;

pub use footer_content_dto::{
    decode_json_list, FooterContentResponseDto, SocialMediaItemDto, UpdateFooterContentDto,
};
