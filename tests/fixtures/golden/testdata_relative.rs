// Code generated by filemap. DO NOT EDIT.

/// Embedded files, sorted by key.
pub static FILES: &[(&str, &[u8])] = &[
    ("bar/bar.txt", b"boo baa\ncool\n"),
    ("foo/se7en", b"foo 42\nvim\n"),
    ("hello/.gitignore", b"# this is a comment.\n"),
    ("hello/hello.txt", b"hello, world\n\n"),
    ("index.html", b"<!doctype html>\n<title>The C Programming Language</title>\n<h1>\n    K&R\n</h1>\n"),
];
