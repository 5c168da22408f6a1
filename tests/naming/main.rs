mod prefix;
