pub mod word_list_loader;
