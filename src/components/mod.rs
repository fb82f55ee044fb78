pub mod camera_panel;
pub mod history_list;
pub mod result_card;
pub mod upload_area;
