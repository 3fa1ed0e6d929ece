pub mod circle_image;
